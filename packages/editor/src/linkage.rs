//! # Reusable Component Linkage
//!
//! ```text
//!              save_as_reusable                insert_from_reusable
//!  Unlinked ───────────────────▶ Unlinked      picker ───────────────▶ Linked
//!
//!            update_content                ApplyGlobally
//!  Linked ─────────────────▶ PendingDecision ─────────────▶ Linked (component + page instances)
//!                                 │  UnlinkAndEdit
//!                                 ├──────────────▶ Unlinked (edited instance only)
//!                                 │  cancel
//!                                 └──────────────▶ Linked (unchanged)
//! ```
//!
//! Propagation is page-scoped: applying globally writes the component and
//! every linked instance on the loaded page. Sections on other pages pick up
//! the new content when they are re-synced.
//!
//! Nothing here is optimistic. The component write happens first, and each
//! instance is only updated locally once its own write is acknowledged.

use pagecraft_common::StoreError;
use pagecraft_content::{ComponentId, ReusableComponent, SectionId};
use tracing::{info, warn};

use crate::mutations::PageMutation;
use crate::selection::Dialog;
use crate::session::{unacknowledged, CommandOutcome, EditorSession, PendingDecision};
use crate::EditorError;

/// Operator's answer to a linked edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDecision {
    /// Write the component and every linked instance on the page
    ApplyGlobally,
    /// Apply to the edited section only and drop its link
    UnlinkAndEdit,
}

impl EditorSession {
    pub fn open_save_as_reusable(&mut self, id: &SectionId) -> Result<(), EditorError> {
        if self.page.section(id).is_none() {
            return Err(EditorError::SectionNotFound(id.clone()));
        }
        self.open_dialog(Dialog::SaveAsReusable { section: id.clone() });
        Ok(())
    }

    /// Persist a new reusable component from a section's current content
    ///
    /// The section itself stays unlinked. A name clash is reported to the
    /// operator and the dialog stays open for another try.
    pub async fn save_as_reusable(
        &mut self,
        id: &SectionId,
        name: &str,
        description: &str,
    ) -> Result<ReusableComponent, EditorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyComponentName);
        }
        let section = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?;

        let created = self
            .store
            .create_reusable_component(name, description.trim(), &section.content)
            .await;
        let component = match created {
            Ok(component) => component,
            Err(StoreError::Conflict(message)) => {
                self.notifications.warning(format!("Choose another name: {}", message));
                return Err(StoreError::Conflict(message).into());
            }
            Err(e) => {
                self.notifications.error(format!("Could not save component: {}", e));
                return Err(e.into());
            }
        };

        if matches!(self.interaction.dialog(), Some(Dialog::SaveAsReusable { .. })) {
            self.interaction.close();
        }
        info!(component = %component.id, section = %id, "saved reusable component");
        self.notifications.success(format!("Saved \"{}\" as a reusable component", component.name));
        self.components.push(component.clone());
        Ok(component)
    }

    /// Components from the last listing
    pub fn components(&self) -> &[ReusableComponent] {
        &self.components
    }

    /// Fetch the component list; a read failure leaves it empty
    pub async fn load_components(&mut self) -> &[ReusableComponent] {
        self.components = match self.store.list_reusable_components().await {
            Ok(components) => components,
            Err(e) => {
                warn!(error = %e, "failed to list reusable components");
                self.notifications.error(format!("Could not load reusable components: {}", e));
                Vec::new()
            }
        };
        &self.components
    }

    pub async fn open_reusable_picker(&mut self) -> &[ReusableComponent] {
        self.open_dialog(Dialog::ReusablePicker);
        self.load_components().await
    }

    /// Append a linked section seeded with a copy of the component's content
    pub async fn insert_from_reusable(&mut self, component_id: &ComponentId) -> Result<SectionId, EditorError> {
        let component = self
            .components
            .iter()
            .find(|c| &c.id == component_id)
            .cloned()
            .ok_or_else(|| EditorError::ComponentNotFound(component_id.to_string()))?;
        let link = component.link();

        let created = self
            .store
            .create_section(&self.page.id, &component.content, Some(&link))
            .await;
        let section = match created {
            Ok(section) => section,
            Err(e) => {
                self.notifications.error(format!("Could not insert \"{}\": {}", component.name, e));
                return Err(e.into());
            }
        };

        let id = section.id.clone();
        self.page.apply(&PageMutation::Append { section })?;
        if self.interaction.dialog() == Some(&Dialog::ReusablePicker) {
            self.interaction.close();
        }
        self.interaction.select(Some(id.clone()));
        info!(section = %id, component = %component.id, "inserted linked section");
        Ok(id)
    }

    pub fn pending_decision(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    /// Carry out the staged linked edit
    ///
    /// On failure the decision stays pending so the operator can retry.
    pub async fn resolve_linked_edit(&mut self, decision: LinkDecision) -> Result<CommandOutcome, EditorError> {
        let pending = self.pending.take().ok_or(EditorError::NoPendingDecision)?;

        let result = match decision {
            LinkDecision::ApplyGlobally => self.apply_globally(&pending).await,
            LinkDecision::UnlinkAndEdit => {
                self.commit_confirmed(PageMutation::Unlink {
                    id: pending.section_id.clone(),
                    content: pending.content.clone(),
                })
                .await
            }
        };

        match &result {
            Err(_) => self.pending = Some(pending),
            Ok(_) => {
                if matches!(self.interaction.dialog(), Some(Dialog::LinkedEditDecision { .. })) {
                    self.interaction.close();
                }
                // Refused or partial outcomes leave the edited field showing stored content
                self.sync_inline(&pending.section_id);
            }
        }
        result
    }

    async fn apply_globally(&mut self, pending: &PendingDecision) -> Result<CommandOutcome, EditorError> {
        let written = self
            .store
            .update_reusable_component(&pending.component_id, &pending.content)
            .await;
        if let Some(error) = unacknowledged(written, "update reusable component") {
            warn!(component = %pending.component_id, error = %error, "component write failed");
            self.notifications.error(format!(
                "Could not update \"{}\": {}",
                pending.component_name, error
            ));
            return Err(error);
        }
        if let Some(component) = self.components.iter_mut().find(|c| c.id == pending.component_id) {
            component.content = pending.content.clone();
        }

        let mut skipped = Vec::new();
        for id in self.page.instances_of(&pending.component_id) {
            let locked = self.page.section(&id).map(|s| s.is_locked).unwrap_or(false);
            if locked {
                skipped.push(id);
                continue;
            }
            let mutation = PageMutation::SetContent {
                id: id.clone(),
                content: pending.content.clone(),
            };
            // Each failure is already reported; remaining instances still get written
            if self.commit_confirmed(mutation).await.is_err() {
                skipped.push(id);
            }
        }

        if !skipped.is_empty() {
            self.notifications.warning(format!(
                "\"{}\" was updated, but {} section(s) on this page kept their old content",
                pending.component_name,
                skipped.len()
            ));
        }
        info!(component = %pending.component_id, "applied linked edit globally");
        Ok(CommandOutcome::Applied)
    }

    /// Drop the staged edit without touching anything
    pub fn cancel_linked_edit(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if matches!(self.interaction.dialog(), Some(Dialog::LinkedEditDecision { .. })) {
            self.interaction.close();
        }
        self.sync_inline(&pending.section_id);
        true
    }

    /// Re-pull the component's current content into a linked section
    pub async fn resync_from_component(&mut self, id: &SectionId) -> Result<CommandOutcome, EditorError> {
        let component_id = self
            .page
            .section(id)
            .ok_or_else(|| EditorError::SectionNotFound(id.clone()))?
            .linked_component()
            .cloned()
            .ok_or_else(|| EditorError::NotLinked(id.clone()))?;

        self.load_components().await;
        let content = self
            .components
            .iter()
            .find(|c| c.id == component_id)
            .map(|c| c.content.clone())
            .ok_or_else(|| EditorError::ComponentNotFound(component_id.to_string()))?;

        self.commit_confirmed(PageMutation::SetContent { id: id.clone(), content }).await
    }
}
