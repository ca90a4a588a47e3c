//! # Editor Session
//!
//! One operator's view of one page: the canonical section list, selection and
//! dialog state, inline fields, pending linked-edit decisions and the
//! notification queue.
//!
//! ## Write policy
//!
//! - Ordering, visibility, lock, delete, style and plain content edits are
//!   applied locally first, then persisted. A failed or unacknowledged write
//!   is rolled back by applying the mutation's inverse.
//! - Creating sections, unlinking and reusable propagation are persisted
//!   first and only applied locally once the backend confirms.
//! - Each discrete commit issues exactly one backend write.
//!
//! Mutations refused because of a lock come back as
//! [`CommandOutcome::Refused`], never as an error.

use pagecraft_common::{
    ContentStore, Direction, MediaFilter, MediaItem, MediaLibrary, StoreResult, Upload,
};
use pagecraft_content::{
    field_at, resolve, validate, ComponentId, Content, EffectiveStyle, FieldIssue, FieldKind,
    FieldPath, GlobalBranding, PageId, ReusableComponent, Section, SectionId, SectionKind,
    StyleOverride,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::fields::{apply_edit, find_field, render_fields, FieldEdit, RenderedField};
use crate::inline::{Commit, EditHandle, InlineField, InlineKey, KeyResult};
use crate::mutations::{MutationError, PageMutation};
use crate::notifications::{Notification, Notifications};
use crate::page::Page;
use crate::selection::{Dialog, Focus, Interaction, Key, KeyAction, PointerTarget};
use crate::EditorError;

/// Why a command was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    Locked(SectionId),
    /// The adjacent section a move would displace is locked
    NeighbourLocked(SectionId),
}

/// What a command did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Nothing to do (e.g. moving the first section up)
    Unchanged,
    Refused(Refusal),
    /// A dialog is waiting for the operator
    AwaitingDecision,
}

/// Content edit on a linked section, staged until the operator decides
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDecision {
    pub section_id: SectionId,
    pub component_id: ComponentId,
    pub component_name: String,
    pub content: Content,
}

pub struct EditorSession {
    pub(crate) page: Page,
    pub(crate) store: Arc<dyn ContentStore>,
    media: Arc<dyn MediaLibrary>,
    branding: Arc<GlobalBranding>,
    config: EditorConfig,
    pub(crate) interaction: Interaction,
    pub(crate) pending: Option<PendingDecision>,
    pub(crate) components: Vec<ReusableComponent>,
    media_results: Vec<MediaItem>,
    inline: HashMap<(SectionId, FieldPath), InlineField>,
    pub(crate) notifications: Notifications,
}

impl EditorSession {
    pub fn new(
        page: Page,
        store: Arc<dyn ContentStore>,
        media: Arc<dyn MediaLibrary>,
        branding: Arc<GlobalBranding>,
        config: EditorConfig,
    ) -> Self {
        Self {
            notifications: Notifications::new(config.max_notifications),
            page,
            store,
            media,
            branding,
            config,
            interaction: Interaction::default(),
            pending: None,
            components: Vec::new(),
            media_results: Vec::new(),
            inline: HashMap::new(),
        }
    }

    /// Load a page from the store
    ///
    /// A read failure opens an empty page and queues an error notification.
    pub async fn open(
        page_id: PageId,
        store: Arc<dyn ContentStore>,
        media: Arc<dyn MediaLibrary>,
        branding: Arc<GlobalBranding>,
        config: EditorConfig,
    ) -> Self {
        let loaded = store.list_sections(&page_id).await;
        let (page, failure) = match loaded {
            Ok(sections) => (Page::new(page_id, sections), None),
            Err(e) => {
                warn!(page = %page_id, error = %e, "failed to load sections");
                (Page::empty(page_id), Some(e))
            }
        };
        info!(page = %page.id, sections = page.len(), "opened page");

        let mut session = Self::new(page, store, media, branding, config);
        if let Some(e) = failure {
            session.notifications.error(format!("Could not load sections: {}", e));
        }
        session
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn branding(&self) -> &Arc<GlobalBranding> {
        &self.branding
    }

    /// Swap in a new branding snapshot from the branding-update flow
    pub fn set_branding(&mut self, branding: Arc<GlobalBranding>) {
        self.branding = branding;
    }

    pub fn selected(&self) -> Option<&SectionId> {
        self.interaction.selected()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.interaction.dialog()
    }

    /// Closing the linked-edit decision cancels the staged edit
    pub fn close_dialog(&mut self) -> Option<Dialog> {
        let closed = self.interaction.close();
        self.drop_orphaned_decision();
        closed
    }

    /// Open `dialog` over whatever is open; a staged linked edit does not survive it
    pub(crate) fn open_dialog(&mut self, dialog: Dialog) {
        self.interaction.open(dialog);
        self.drop_orphaned_decision();
    }

    fn drop_orphaned_decision(&mut self) {
        let deciding = matches!(self.interaction.dialog(), Some(Dialog::LinkedEditDecision { .. }));
        if !deciding && self.pending.is_some() {
            debug!("decision dialog gone, discarding staged linked edit");
            self.cancel_linked_edit();
        }
    }

    /// Last media library listing
    pub fn media_results(&self) -> &[MediaItem] {
        &self.media_results
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // ---- Ordering & visibility ----

    /// Append a section of `kind` with default content and select it
    pub async fn add_section(&mut self, kind: SectionKind) -> Result<SectionId, EditorError> {
        let content = Content::default_for(kind);
        let created = self.store.create_section(&self.page.id, &content, None).await;
        let section = match created {
            Ok(section) => section,
            Err(e) => {
                self.notifications.error(format!("Could not add {} section: {}", kind.label(), e));
                return Err(e.into());
            }
        };

        let id = section.id.clone();
        self.page.apply(&PageMutation::Append { section })?;
        self.interaction.select(Some(id.clone()));
        info!(section = %id, kind = %kind, "added section");
        Ok(id)
    }

    pub async fn move_up(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        self.move_section(id, Direction::Up).await
    }

    pub async fn move_down(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        self.move_section(id, Direction::Down).await
    }

    pub async fn move_section(&mut self, id: &SectionId, direction: Direction) -> Result<CommandOutcome, EditorError> {
        self.commit_optimistic(PageMutation::Move {
            id: id.clone(),
            direction,
        })
        .await
    }

    pub async fn toggle_visibility(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        self.commit_optimistic(PageMutation::ToggleVisibility { id: id.clone() }).await
    }

    pub async fn toggle_lock(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        self.commit_optimistic(PageMutation::ToggleLock { id: id.clone() }).await
    }

    /// Start the delete flow; asks for confirmation unless configured off
    pub async fn request_delete(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        if section.is_locked {
            debug!(section = %id, "delete refused, section is locked");
            return Ok(CommandOutcome::Refused(Refusal::Locked(id.clone())));
        }

        if self.config.confirm_delete {
            self.open_dialog(Dialog::ConfirmDelete { section: id.clone() });
            return Ok(CommandOutcome::AwaitingDecision);
        }
        self.delete_section(id).await
    }

    /// Delete the section named by the open confirmation dialog
    pub async fn confirm_delete(&mut self) -> Result<CommandOutcome, EditorError> {
        match self.interaction.dialog() {
            Some(Dialog::ConfirmDelete { section }) => {
                let id = section.clone();
                self.interaction.close();
                self.delete_section(&id).await
            }
            _ => Ok(CommandOutcome::Unchanged),
        }
    }

    pub async fn delete_section(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        let outcome = self.commit_optimistic(PageMutation::Delete { id: id.clone() }).await?;
        if outcome == CommandOutcome::Applied {
            self.interaction.forget(id);
            if self.pending.as_ref().map(|p| &p.section_id) == Some(id) {
                self.pending = None;
            }
        }
        Ok(outcome)
    }

    // ---- Content ----

    /// The single entry point for content changes
    ///
    /// Edits that introduce a validation issue are rejected before any
    /// backend call. Edits to a linked section are staged and open the
    /// apply-globally / unlink decision instead of being applied.
    pub async fn update_content(&mut self, id: &SectionId, content: Content) -> Result<CommandOutcome, EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        if section.is_locked {
            debug!(section = %id, "content edit refused, section is locked");
            return Ok(CommandOutcome::Refused(Refusal::Locked(id.clone())));
        }
        if content.kind() != section.kind() {
            return Err(MutationError::KindMismatch {
                expected: section.kind(),
                actual: content.kind(),
            }
            .into());
        }

        let issues = introduced_issues(&section.content, &content)?;
        if !issues.is_empty() {
            return Err(EditorError::Validation(issues));
        }

        if let Some(link) = section.reusable_ref.as_ref().filter(|r| r.is_linked) {
            if content == section.content {
                return Ok(CommandOutcome::Unchanged);
            }
            debug!(section = %id, component = %link.component_id, "staging linked edit");
            let decision = PendingDecision {
                section_id: id.clone(),
                component_id: link.component_id.clone(),
                component_name: link.component_name.clone(),
                content,
            };
            self.interaction.open(Dialog::LinkedEditDecision {
                section: id.clone(),
                component_name: link.component_name.clone(),
            });
            if let Some(replaced) = self.pending.replace(decision) {
                if &replaced.section_id != id {
                    self.sync_inline(&replaced.section_id);
                }
            }
            return Ok(CommandOutcome::AwaitingDecision);
        }

        self.commit_optimistic(PageMutation::SetContent { id: id.clone(), content }).await
    }

    /// Render the settings panel fields of a section
    pub fn render_fields(&self, id: &SectionId) -> Result<Vec<RenderedField>, EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        let schema = section.kind().schema();
        let wire = section.content.to_wire()?;
        let issues = validate(&schema, &wire);
        Ok(render_fields(&schema, &wire, &issues))
    }

    /// Apply a settings panel edit through [`update_content`](Self::update_content)
    pub async fn apply_field_edit(&mut self, id: &SectionId, edit: &FieldEdit) -> Result<CommandOutcome, EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        let kind = section.kind();
        let wire = apply_edit(&kind.schema(), &section.content.to_wire()?, edit)?;
        let content = Content::from_wire(kind, wire)?;
        self.update_content(id, content).await
    }

    // ---- Style ----

    /// Replace a section's style override; never goes through linkage
    pub async fn set_style_override(
        &mut self,
        id: &SectionId,
        style: Option<StyleOverride>,
    ) -> Result<CommandOutcome, EditorError> {
        if let Some(style) = &style {
            style.validate()?;
        }
        self.commit_optimistic(PageMutation::SetStyle { id: id.clone(), style }).await
    }

    /// Pin every override field to the current branding and switch custom styles off
    pub async fn reset_style_to_global(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        let style = StyleOverride::reset_to_global(&self.branding);
        self.set_style_override(id, Some(style)).await
    }

    pub fn effective_style(&self, id: &SectionId) -> Option<EffectiveStyle> {
        self.page
            .section(id)
            .map(|section| resolve(section.style_override.as_ref(), &self.branding))
    }

    // ---- Selection & keyboard ----

    pub fn select(&mut self, id: &SectionId) {
        if self.page.section(id).is_some() {
            self.interaction.toggle(id);
        }
    }

    pub fn click(&mut self, target: &PointerTarget) {
        if let PointerTarget::Section(id) = target {
            if self.page.section(id).is_none() {
                return;
            }
        }
        self.interaction.click(target);
    }

    pub async fn handle_key(&mut self, key: Key, focus: Focus) -> Result<KeyAction, EditorError> {
        let action = self.interaction.key(key, focus);
        if action == KeyAction::DialogClosed {
            self.drop_orphaned_decision();
        }
        if let KeyAction::RequestDelete(id) = &action {
            self.request_delete(id).await?;
        }
        Ok(action)
    }

    // ---- Inline editing ----

    pub fn inline_field(&self, id: &SectionId, path: &FieldPath) -> Option<&InlineField> {
        self.inline.get(&(id.clone(), path.clone()))
    }

    pub fn inline_mut(&mut self, id: &SectionId, path: &FieldPath) -> Option<&mut InlineField> {
        self.inline.get_mut(&(id.clone(), path.clone()))
    }

    /// Focus a text field for in-place editing
    ///
    /// Returns `None` for a locked section.
    pub fn begin_inline_edit(&mut self, id: &SectionId, path: &FieldPath) -> Result<Option<EditHandle>, EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        if section.is_locked {
            return Ok(None);
        }

        let schema = section.kind().schema();
        let multiline = match field_at(&schema, path).map(|field| &field.kind) {
            Some(FieldKind::Text) => false,
            Some(FieldKind::Textarea | FieldKind::RichText) => true,
            _ => return Err(EditorError::NotInlineEditable(path.to_string())),
        };
        let wire = self.displayed_content(section).to_wire()?;
        let current = path.get(&wire).and_then(Value::as_str).unwrap_or_default().to_string();

        let field = self
            .inline
            .entry((id.clone(), path.clone()))
            .or_insert_with(|| InlineField::new(current.as_str(), multiline));
        field.sync_external(&current);
        Ok(Some(field.begin_edit()))
    }

    /// Blur: persist the live text if it changed
    pub async fn commit_inline(
        &mut self,
        id: &SectionId,
        path: &FieldPath,
        handle: EditHandle,
    ) -> Result<CommandOutcome, EditorError> {
        let field = self
            .inline
            .get_mut(&(id.clone(), path.clone()))
            .ok_or_else(|| EditorError::NotInlineEditable(path.to_string()))?;
        match field.commit(handle)? {
            Commit::Changed(text) => self.submit_inline(id, path, text).await,
            Commit::Unchanged => Ok(CommandOutcome::Unchanged),
        }
    }

    pub fn cancel_inline(&mut self, id: &SectionId, path: &FieldPath, handle: EditHandle) -> Result<(), EditorError> {
        let field = self
            .inline
            .get_mut(&(id.clone(), path.clone()))
            .ok_or_else(|| EditorError::NotInlineEditable(path.to_string()))?;
        field.cancel(handle)?;
        self.sync_inline(id);
        Ok(())
    }

    /// Enter / Escape inside an inline field
    pub async fn inline_key(
        &mut self,
        id: &SectionId,
        path: &FieldPath,
        handle: EditHandle,
        key: InlineKey,
    ) -> Result<CommandOutcome, EditorError> {
        let field = self
            .inline
            .get_mut(&(id.clone(), path.clone()))
            .ok_or_else(|| EditorError::NotInlineEditable(path.to_string()))?;
        match field.key(handle, key)? {
            KeyResult::Committed(Commit::Changed(text)) => self.submit_inline(id, path, text).await,
            KeyResult::Committed(Commit::Unchanged)
            | KeyResult::Cancelled
            | KeyResult::Inserted
            | KeyResult::Ignored => Ok(CommandOutcome::Unchanged),
        }
    }

    async fn submit_inline(&mut self, id: &SectionId, path: &FieldPath, text: String) -> Result<CommandOutcome, EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        let kind = section.kind();
        let mut wire = section.content.to_wire()?;
        path.set(&mut wire, Value::String(text))?;
        let content = Content::from_wire(kind, wire)?;

        let result = self.update_content(id, content).await;
        self.sync_inline(id);
        result
    }

    /// Content inline fields show: the staged edit while its decision is open
    fn displayed_content<'a>(&'a self, section: &'a Section) -> &'a Content {
        match &self.pending {
            Some(pending) if pending.section_id == section.id => &pending.content,
            _ => &section.content,
        }
    }

    /// Push the section's displayed content into its idle inline fields
    pub(crate) fn sync_inline(&mut self, id: &SectionId) {
        let wire = match self.page.section(id).map(|s| self.displayed_content(s).to_wire()) {
            Some(Ok(wire)) => wire,
            Some(Err(e)) => {
                warn!(section = %id, error = %e, "cannot sync inline fields");
                return;
            }
            None => {
                self.inline.retain(|(section, _), _| section != id);
                return;
            }
        };

        for ((_, path), field) in self.inline.iter_mut().filter(|((section, _), _)| section == id) {
            let value = path.get(&wire).and_then(Value::as_str).unwrap_or_default();
            if !field.sync_external(value) {
                debug!(section = %id, field = %path, "inline field busy, skipped sync");
            }
        }
    }

    // ---- Media ----

    /// Open the media picker for an image field and list images
    pub async fn open_media_picker(&mut self, id: &SectionId, path: &FieldPath) -> Result<&[MediaItem], EditorError> {
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;
        match field_at(&section.kind().schema(), path).map(|field| &field.kind) {
            Some(FieldKind::Image) => {}
            _ => return Err(EditorError::InvalidEdit(format!("{} is not an image field", path))),
        }

        self.open_dialog(Dialog::MediaPicker {
            section: id.clone(),
            path: path.clone(),
        });
        self.media_results = match self.media.list_media(&MediaFilter::images()).await {
            Ok(items) => items,
            Err(e) => {
                self.notifications.error(format!("Could not load media: {}", e));
                Vec::new()
            }
        };
        Ok(&self.media_results)
    }

    /// Store the picked item into the field the picker was opened for
    pub async fn pick_media(&mut self, item: &MediaItem) -> Result<CommandOutcome, EditorError> {
        let (id, path) = match self.interaction.dialog() {
            Some(Dialog::MediaPicker { section, path }) => (section.clone(), path.clone()),
            _ => return Ok(CommandOutcome::Unchanged),
        };
        self.interaction.close();

        let rendered = self.render_fields(&id)?;
        let edit = find_field(&rendered, &path)
            .and_then(|field| field.choose_media(item))
            .ok_or_else(|| EditorError::InvalidEdit(path.to_string()))?;
        self.apply_field_edit(&id, &edit).await
    }

    pub async fn upload_media(&mut self, file: Upload) -> Result<MediaItem, EditorError> {
        match self.media.upload(file).await {
            Ok(item) => {
                info!(media = %item.id, "uploaded media");
                self.media_results.insert(0, item.clone());
                Ok(item)
            }
            Err(e) => {
                self.notifications.error(format!("Upload failed: {}", e));
                Err(e.into())
            }
        }
    }

    // ---- Commit helpers ----

    /// Apply locally, persist, roll back on failure
    pub(crate) async fn commit_optimistic(&mut self, mutation: PageMutation) -> Result<CommandOutcome, EditorError> {
        if let Err(e) = self.page.validate(&mutation) {
            return refusal(e);
        }
        let inverse = self.page.inverse(&mutation)?;
        if !self.page.apply(&mutation)?.changed {
            return Ok(CommandOutcome::Unchanged);
        }

        let persisted = self.persist(&mutation).await;
        if let Some(error) = unacknowledged(persisted, mutation.name()) {
            self.page.apply(&inverse)?;
            warn!(mutation = mutation.name(), section = %mutation.target(), error = %error, "rolled back");
            self.notifications.error(format!("Could not save change: {}", error));
            self.sync_inline(mutation.target());
            return Err(error);
        }

        self.sync_inline(mutation.target());
        Ok(CommandOutcome::Applied)
    }

    /// Persist first, apply locally only once acknowledged
    pub(crate) async fn commit_confirmed(&mut self, mutation: PageMutation) -> Result<CommandOutcome, EditorError> {
        if let Err(e) = self.page.validate(&mutation) {
            return refusal(e);
        }

        let persisted = self.persist(&mutation).await;
        if let Some(error) = unacknowledged(persisted, mutation.name()) {
            warn!(mutation = mutation.name(), section = %mutation.target(), error = %error, "write failed");
            self.notifications.error(format!("Could not save change: {}", error));
            return Err(error);
        }

        let result = self.page.apply(&mutation)?;
        self.sync_inline(mutation.target());
        Ok(if result.changed {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Unchanged
        })
    }

    async fn persist(&self, mutation: &PageMutation) -> StoreResult<bool> {
        match mutation {
            PageMutation::Move { id, direction } => self.store.reorder(id, *direction).await,
            PageMutation::ToggleVisibility { id } => self.store.toggle_visibility(id).await,
            PageMutation::ToggleLock { id } => self.store.toggle_lock(id).await,
            PageMutation::Delete { id } => self.store.delete_section(id).await,
            PageMutation::SetContent { id, content } => self.store.update_section_content(id, content).await,
            PageMutation::SetStyle { id, style } => self.store.update_section_style(id, style.as_ref()).await,
            PageMutation::Unlink { id, content } => self.store.unlink_section(id, content).await,
            // Only ever applied locally: after a confirmed create, or as a rollback
            PageMutation::Append { .. } | PageMutation::Restore { .. } | PageMutation::Revert { .. } => Ok(true),
        }
    }
}

/// Map lock refusals to an outcome; anything else is an error
fn refusal(error: MutationError) -> Result<CommandOutcome, EditorError> {
    match error {
        MutationError::SectionLocked(id) => {
            debug!(section = %id, "refused, section is locked");
            Ok(CommandOutcome::Refused(Refusal::Locked(id)))
        }
        MutationError::NeighbourLocked(id) => {
            debug!(section = %id, "refused, neighbour is locked");
            Ok(CommandOutcome::Refused(Refusal::NeighbourLocked(id)))
        }
        other => Err(other.into()),
    }
}

/// `Ok(false)` counts as a failed write
pub(crate) fn unacknowledged(persisted: StoreResult<bool>, what: &'static str) -> Option<EditorError> {
    match persisted {
        Ok(true) => None,
        Ok(false) => Some(EditorError::NotAcknowledged(what)),
        Err(e) => Some(e.into()),
    }
}

/// Issues `next` has that `current` did not already have
///
/// A fresh section starts with blank required fields; editing one field must
/// not be blocked by another field the operator has not reached yet.
fn introduced_issues(current: &Content, next: &Content) -> Result<Vec<FieldIssue>, EditorError> {
    let schema = next.kind().schema();
    let before = validate(&schema, &current.to_wire()?);
    let after = validate(&schema, &next.to_wire()?);
    Ok(after
        .into_iter()
        .filter(|issue| !before.iter().any(|known| known.path == issue.path))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::{MemoryMediaLibrary, MemoryStore, StoreOp};
    use pagecraft_content::payloads::HeroContent;

    fn page_id() -> PageId {
        PageId::new("home")
    }

    fn session_with(store: Arc<MemoryStore>) -> EditorSession {
        let sections = store.sections(&page_id());
        EditorSession::new(
            Page::new(page_id(), sections),
            store,
            Arc::new(MemoryMediaLibrary::new()),
            Arc::new(GlobalBranding::default()),
            EditorConfig::default(),
        )
    }

    fn three() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new().with_page(
            page_id(),
            vec![
                Section::new(SectionId::new("a"), Content::default_for(SectionKind::Hero), 0),
                Section::new(SectionId::new("b"), Content::default_for(SectionKind::Text), 1),
                Section::new(SectionId::new("c"), Content::default_for(SectionKind::Faq), 2),
            ],
        ))
    }

    fn order(session: &EditorSession) -> Vec<&str> {
        session.page().sections().iter().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_move_boundary_makes_no_call() {
        let store = three();
        let mut session = session_with(store.clone());

        let outcome = session.move_up(&SectionId::new("a")).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Unchanged);
        assert_eq!(store.calls(StoreOp::Reorder), 0);
    }

    #[tokio::test]
    async fn test_failed_toggle_rolls_back() {
        let store = three();
        store.fail(StoreOp::ToggleVisibility);
        let mut session = session_with(store.clone());

        let result = session.toggle_visibility(&SectionId::new("b")).await;
        assert!(matches!(result, Err(EditorError::Store(_))));
        assert!(session.page().section(&SectionId::new("b")).unwrap().is_visible);
        assert_eq!(session.drain_notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_locked_neighbour_refuses_move() {
        let store = three();
        let mut session = session_with(store.clone());
        session.toggle_lock(&SectionId::new("a")).await.unwrap();

        let outcome = session.move_up(&SectionId::new("b")).await.unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Refused(Refusal::NeighbourLocked(SectionId::new("a")))
        );
        assert_eq!(order(&session), vec!["a", "b", "c"]);
        assert!(session.drain_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_validation_blocks_without_backend_call() {
        let store = three();
        let mut session = session_with(store.clone());
        let id = SectionId::new("a");

        let filled = Content::Hero(HeroContent {
            headline: "Sale".to_string(),
            ..HeroContent::default()
        });
        session.update_content(&id, filled).await.unwrap();

        let cleared = Content::Hero(HeroContent::default());
        let result = session.update_content(&id, cleared).await;
        assert!(matches!(result, Err(EditorError::Validation(_))));
        assert_eq!(store.calls(StoreOp::UpdateSectionContent), 1);
    }

    #[tokio::test]
    async fn test_blank_required_field_does_not_block_other_fields() {
        let store = three();
        let mut session = session_with(store.clone());

        let content = Content::Hero(HeroContent {
            subheadline: "Everything must go".to_string(),
            ..HeroContent::default()
        });
        let outcome = session.update_content(&SectionId::new("a"), content).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Applied);
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_an_error() {
        let store = three();
        let mut session = session_with(store);
        let result = session
            .update_content(&SectionId::new("a"), Content::default_for(SectionKind::Text))
            .await;
        assert!(matches!(result, Err(EditorError::Mutation(MutationError::KindMismatch { .. }))));
    }

    #[tokio::test]
    async fn test_reset_style_pins_current_branding() {
        let store = three();
        let mut session = session_with(store.clone());
        let id = SectionId::new("a");

        session.reset_style_to_global(&id).await.unwrap();
        let style = session.page().section(&id).unwrap().style_override.clone().unwrap();
        assert!(!style.use_custom_styles);
        assert_eq!(style.primary_color.as_deref(), Some("#2563eb"));
        assert_eq!(store.calls(StoreOp::UpdateSectionStyle), 1);

        let effective = session.effective_style(&id).unwrap();
        assert_eq!(effective, EffectiveStyle::from(&GlobalBranding::default()));
    }
}
