//! External collaborators consumed by the editor.
//!
//! Persistence, media and branding live behind these traits so the editor can
//! run against a real backend or the in-memory implementations in
//! [`crate::memory`].

use async_trait::async_trait;
use pagecraft_content::{
    ComponentId, Content, GlobalBranding, MediaId, PageId, ReusableComponent, ReusableRef,
    Section, SectionId, StyleOverride,
};
use serde::{Deserialize, Serialize};

use crate::result::StoreResult;

/// Direction of an adjacent swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Content-item store holding sections and reusable components
///
/// Boolean results report whether the backend acknowledged the write as
/// durable; `Ok(false)` is treated the same as an error by callers.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_sections(&self, page: &PageId) -> StoreResult<Vec<Section>>;

    /// Append a section; `link` is set when inserting from a reusable component
    async fn create_section(
        &self,
        page: &PageId,
        content: &Content,
        link: Option<&ReusableRef>,
    ) -> StoreResult<Section>;

    async fn update_section_content(&self, id: &SectionId, content: &Content) -> StoreResult<bool>;

    /// Write `content` and clear the section's reusable reference in one step
    async fn unlink_section(&self, id: &SectionId, content: &Content) -> StoreResult<bool>;

    async fn update_section_style(
        &self,
        id: &SectionId,
        style: Option<&StyleOverride>,
    ) -> StoreResult<bool>;

    async fn toggle_visibility(&self, id: &SectionId) -> StoreResult<bool>;

    async fn toggle_lock(&self, id: &SectionId) -> StoreResult<bool>;

    async fn delete_section(&self, id: &SectionId) -> StoreResult<bool>;

    async fn reorder(&self, id: &SectionId, direction: Direction) -> StoreResult<bool>;

    async fn create_reusable_component(
        &self,
        name: &str,
        description: &str,
        content: &Content,
    ) -> StoreResult<ReusableComponent>;

    async fn update_reusable_component(&self, id: &ComponentId, content: &Content) -> StoreResult<bool>;

    async fn list_reusable_components(&self) -> StoreResult<Vec<ReusableComponent>>;
}

/// Item in the media library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: MediaId,
    pub file_name: String,
    /// Public URL the item resolves to
    pub url: String,
    #[serde(default)]
    pub alt: String,
    pub content_type: String,
    pub size: u64,
}

/// Narrowing for media listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaFilter {
    /// Case-insensitive substring of the file name or alt text
    pub search: Option<String>,
    /// e.g. `image/`
    pub content_type_prefix: Option<String>,
}

impl MediaFilter {
    pub fn images() -> Self {
        Self {
            search: None,
            content_type_prefix: Some("image/".to_string()),
        }
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        let type_ok = self
            .content_type_prefix
            .as_deref()
            .map(|prefix| item.content_type.starts_with(prefix))
            .unwrap_or(true);
        let search_ok = self
            .search
            .as_deref()
            .map(|needle| {
                let needle = needle.to_lowercase();
                item.file_name.to_lowercase().contains(&needle) || item.alt.to_lowercase().contains(&needle)
            })
            .unwrap_or(true);
        type_ok && search_ok
    }
}

/// File handed to the media library
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Media library / object store
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn list_media(&self, filter: &MediaFilter) -> StoreResult<Vec<MediaItem>>;

    async fn upload(&self, file: Upload) -> StoreResult<MediaItem>;
}

/// Where the site branding is kept
#[async_trait]
pub trait BrandingSource: Send + Sync {
    async fn load_branding(&self) -> StoreResult<GlobalBranding>;

    async fn save_branding(&self, branding: &GlobalBranding) -> StoreResult<bool>;
}
