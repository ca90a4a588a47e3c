//! In-memory collaborators for tests, demos and offline editing.
//!
//! Each one can be told to fail specific operations so callers can exercise
//! their error paths, and [`MemoryStore`] counts calls per operation.

use async_trait::async_trait;
use pagecraft_content::{
    ComponentId, Content, GlobalBranding, MediaId, PageId, ReusableComponent, ReusableRef,
    Section, SectionId, StyleOverride,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::StoreError;
use crate::result::StoreResult;
use crate::store::{
    BrandingSource, ContentStore, Direction, MediaFilter, MediaItem, MediaLibrary, Upload,
};

/// Operations of [`ContentStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListSections,
    CreateSection,
    UpdateSectionContent,
    UnlinkSection,
    UpdateSectionStyle,
    ToggleVisibility,
    ToggleLock,
    DeleteSection,
    Reorder,
    CreateComponent,
    UpdateComponent,
    ListComponents,
}

#[derive(Debug, Default)]
struct StoreState {
    pages: HashMap<PageId, Vec<Section>>,
    components: Vec<ReusableComponent>,
    next_id: u64,
    failing: HashSet<StoreOp>,
    calls: HashMap<StoreOp, usize>,
}

impl StoreState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn record(&mut self, op: StoreOp) -> StoreResult<()> {
        *self.calls.entry(op).or_default() += 1;
        if self.failing.contains(&op) {
            debug!(?op, "Injected store failure");
            return Err(StoreError::Unavailable(format!("{:?} failed", op)));
        }
        Ok(())
    }

    /// Page holding `id`, sorted by order
    fn page_of(&mut self, id: &SectionId) -> Option<&mut Vec<Section>> {
        self.pages
            .values_mut()
            .find(|sections| sections.iter().any(|s| &s.id == id))
    }

    fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.pages
            .values_mut()
            .flat_map(|sections| sections.iter_mut())
            .find(|s| &s.id == id)
    }
}

/// Content store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page; sections are stored in the given order
    pub fn with_page(self, page: PageId, mut sections: Vec<Section>) -> Self {
        for (rank, section) in sections.iter_mut().enumerate() {
            section.order = rank as u32;
        }
        self.lock().pages.insert(page, sections);
        self
    }

    pub fn with_component(self, component: ReusableComponent) -> Self {
        self.lock().components.push(component);
        self
    }

    /// Make every later call of `op` fail
    pub fn fail(&self, op: StoreOp) {
        self.lock().failing.insert(op);
    }

    /// Stop failing `op`
    pub fn heal(&self, op: StoreOp) {
        self.lock().failing.remove(&op);
    }

    /// Number of calls made to `op` so far (failed ones included)
    pub fn calls(&self, op: StoreOp) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Snapshot of a page as stored
    pub fn sections(&self, page: &PageId) -> Vec<Section> {
        self.lock().pages.get(page).cloned().unwrap_or_default()
    }

    pub fn component(&self, id: &ComponentId) -> Option<ReusableComponent> {
        self.lock().components.iter().find(|c| &c.id == id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A panicking test thread must not wedge the other assertions
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_sections(&self, page: &PageId) -> StoreResult<Vec<Section>> {
        let mut state = self.lock();
        state.record(StoreOp::ListSections)?;
        Ok(state.pages.get(page).cloned().unwrap_or_default())
    }

    async fn create_section(
        &self,
        page: &PageId,
        content: &Content,
        link: Option<&ReusableRef>,
    ) -> StoreResult<Section> {
        let mut state = self.lock();
        state.record(StoreOp::CreateSection)?;
        let id = SectionId::new(state.next_id("section"));
        let sections = state.pages.entry(page.clone()).or_default();

        let mut section = Section::new(id, content.clone(), sections.len() as u32);
        section.reusable_ref = link.cloned();
        sections.push(section.clone());
        Ok(section)
    }

    async fn update_section_content(&self, id: &SectionId, content: &Content) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::UpdateSectionContent)?;
        let section = state
            .section_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        section.content = content.clone();
        Ok(true)
    }

    async fn unlink_section(&self, id: &SectionId, content: &Content) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::UnlinkSection)?;
        let section = state
            .section_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        section.content = content.clone();
        section.reusable_ref = None;
        Ok(true)
    }

    async fn update_section_style(
        &self,
        id: &SectionId,
        style: Option<&StyleOverride>,
    ) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::UpdateSectionStyle)?;
        let section = state
            .section_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        section.style_override = style.cloned();
        Ok(true)
    }

    async fn toggle_visibility(&self, id: &SectionId) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::ToggleVisibility)?;
        let section = state
            .section_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        section.is_visible = !section.is_visible;
        Ok(true)
    }

    async fn toggle_lock(&self, id: &SectionId) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::ToggleLock)?;
        let section = state
            .section_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        section.is_locked = !section.is_locked;
        Ok(true)
    }

    async fn delete_section(&self, id: &SectionId) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::DeleteSection)?;
        let sections = state
            .page_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        sections.retain(|s| &s.id != id);
        for (rank, section) in sections.iter_mut().enumerate() {
            section.order = rank as u32;
        }
        Ok(true)
    }

    async fn reorder(&self, id: &SectionId, direction: Direction) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::Reorder)?;
        let sections = state
            .page_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        sections.sort_by_key(|s| s.order);

        let Some(index) = sections.iter().position(|s| &s.id == id) else {
            return Ok(false);
        };
        let neighbour = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < sections.len() => index + 1,
            _ => return Ok(false),
        };

        let (a, b) = (sections[index].order, sections[neighbour].order);
        sections[index].order = b;
        sections[neighbour].order = a;
        sections.swap(index, neighbour);
        Ok(true)
    }

    async fn create_reusable_component(
        &self,
        name: &str,
        description: &str,
        content: &Content,
    ) -> StoreResult<ReusableComponent> {
        let mut state = self.lock();
        state.record(StoreOp::CreateComponent)?;
        if state
            .components
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::Conflict(format!(
                "a reusable component named {:?} already exists",
                name
            )));
        }

        let component = ReusableComponent {
            id: ComponentId::new(state.next_id("component")),
            name: name.to_string(),
            description: description.to_string(),
            content: content.clone(),
        };
        state.components.push(component.clone());
        Ok(component)
    }

    async fn update_reusable_component(&self, id: &ComponentId, content: &Content) -> StoreResult<bool> {
        let mut state = self.lock();
        state.record(StoreOp::UpdateComponent)?;
        let component = state
            .components
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        component.content = content.clone();
        Ok(true)
    }

    async fn list_reusable_components(&self) -> StoreResult<Vec<ReusableComponent>> {
        let mut state = self.lock();
        state.record(StoreOp::ListComponents)?;
        Ok(state.components.clone())
    }
}

#[derive(Debug, Default)]
struct MediaState {
    items: Vec<MediaItem>,
    next_id: u64,
    failing: bool,
}

/// Media library kept in process memory
#[derive(Debug, Default)]
pub struct MemoryMediaLibrary {
    state: Mutex<MediaState>,
}

impl MemoryMediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, item: MediaItem) -> Self {
        self.lock().items.push(item);
        self
    }

    /// Make every call fail (or stop failing)
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    fn lock(&self) -> MutexGuard<'_, MediaState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MediaLibrary for MemoryMediaLibrary {
    async fn list_media(&self, filter: &MediaFilter) -> StoreResult<Vec<MediaItem>> {
        let state = self.lock();
        if state.failing {
            return Err(StoreError::Unavailable("media library offline".to_string()));
        }
        Ok(state.items.iter().filter(|item| filter.matches(item)).cloned().collect())
    }

    async fn upload(&self, file: Upload) -> StoreResult<MediaItem> {
        let mut state = self.lock();
        if state.failing {
            return Err(StoreError::Unavailable("media library offline".to_string()));
        }
        state.next_id += 1;
        let item = MediaItem {
            id: MediaId::new(format!("media-{}", state.next_id)),
            url: format!("/uploads/{}", file.file_name),
            file_name: file.file_name,
            alt: String::new(),
            content_type: file.content_type,
            size: file.bytes.len() as u64,
        };
        state.items.push(item.clone());
        Ok(item)
    }
}

/// Branding kept in process memory
#[derive(Debug, Default)]
pub struct MemoryBranding {
    branding: Mutex<Option<GlobalBranding>>,
    failing: Mutex<bool>,
}

impl MemoryBranding {
    pub fn new(branding: GlobalBranding) -> Self {
        Self {
            branding: Mutex::new(Some(branding)),
            failing: Mutex::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(|p| p.into_inner()) = failing;
    }

    pub fn stored(&self) -> Option<GlobalBranding> {
        self.branding.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn check(&self) -> StoreResult<()> {
        if *self.failing.lock().unwrap_or_else(|p| p.into_inner()) {
            return Err(StoreError::Unavailable("branding source offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BrandingSource for MemoryBranding {
    async fn load_branding(&self) -> StoreResult<GlobalBranding> {
        self.check()?;
        self.stored()
            .ok_or_else(|| StoreError::NotFound("branding".to_string()))
    }

    async fn save_branding(&self, branding: &GlobalBranding) -> StoreResult<bool> {
        self.check()?;
        *self.branding.lock().unwrap_or_else(|p| p.into_inner()) = Some(branding.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_content::SectionKind;

    fn page() -> PageId {
        PageId::new("home")
    }

    fn seeded() -> MemoryStore {
        MemoryStore::new().with_page(
            page(),
            vec![
                Section::new(SectionId::new("a"), Content::default_for(SectionKind::Hero), 0),
                Section::new(SectionId::new("b"), Content::default_for(SectionKind::Text), 0),
                Section::new(SectionId::new("c"), Content::default_for(SectionKind::Faq), 0),
            ],
        )
    }

    fn order(store: &MemoryStore) -> Vec<(String, u32)> {
        let mut sections = store.sections(&page());
        sections.sort_by_key(|s| s.order);
        sections.iter().map(|s| (s.id.to_string(), s.order)).collect()
    }

    #[tokio::test]
    async fn test_seeding_assigns_dense_ranks() {
        let store = seeded();
        assert_eq!(order(&store), vec![("a".into(), 0), ("b".into(), 1), ("c".into(), 2)]);
    }

    #[tokio::test]
    async fn test_reorder_swaps_neighbours() {
        let store = seeded();
        assert!(store.reorder(&SectionId::new("c"), Direction::Up).await.unwrap());
        assert_eq!(order(&store), vec![("a".into(), 0), ("c".into(), 1), ("b".into(), 2)]);

        assert!(!store.reorder(&SectionId::new("a"), Direction::Up).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_redensifies() {
        let store = seeded();
        assert!(store.delete_section(&SectionId::new("a")).await.unwrap());
        assert_eq!(order(&store), vec![("b".into(), 0), ("c".into(), 1)]);
    }

    #[tokio::test]
    async fn test_injected_failures_are_counted() {
        let store = seeded();
        store.fail(StoreOp::ToggleLock);
        assert!(store.toggle_lock(&SectionId::new("a")).await.is_err());
        store.heal(StoreOp::ToggleLock);
        assert!(store.toggle_lock(&SectionId::new("a")).await.unwrap());
        assert_eq!(store.calls(StoreOp::ToggleLock), 2);
        assert!(store.sections(&page())[0].is_locked);
    }

    #[tokio::test]
    async fn test_component_names_are_unique() {
        let store = MemoryStore::new();
        let content = Content::default_for(SectionKind::Button);
        store.create_reusable_component("Footer", "", &content).await.unwrap();
        let err = store
            .create_reusable_component("footer", "", &content)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_media_filter_and_upload() {
        let library = MemoryMediaLibrary::new();
        let uploaded = library
            .upload(Upload {
                file_name: "Team.png".into(),
                content_type: "image/png".into(),
                bytes: vec![0; 16],
            })
            .await
            .unwrap();
        library
            .upload(Upload {
                file_name: "menu.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![0; 4],
            })
            .await
            .unwrap();

        let images = library.list_media(&MediaFilter::images()).await.unwrap();
        assert_eq!(images, vec![uploaded.clone()]);
        assert_eq!(uploaded.url, "/uploads/Team.png");
        assert_eq!(uploaded.size, 16);

        let search = MediaFilter {
            search: Some("team".into()),
            content_type_prefix: None,
        };
        assert_eq!(library.list_media(&search).await.unwrap().len(), 1);
    }
}
