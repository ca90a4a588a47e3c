//! # Pagecraft Editor
//!
//! Composition and state engine for the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content: Content, schema, style resolver    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorSession                       │
//! │  - Page: ordered sections + mutations       │
//! │  - fields / inline: value edits             │
//! │  - linkage: apply-globally / unlink         │
//! │  - selection, dialogs, notifications        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ common: ContentStore, MediaLibrary, ...     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One funnel for content**: settings panel and inline edits both end in
//!    [`EditorSession::update_content`], which is where linkage intercepts
//! 2. **Locks are enforced by the page**: every mutation is validated by
//!    [`Page::apply`], not only by disabled controls
//! 3. **Style is local**: style overrides never propagate through a link
//! 4. **Unacknowledged writes do not show**: optimistic changes roll back,
//!    propagation waits for the backend
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditorConfig, EditorSession};
//! use pagecraft_content::{FieldPath, SectionKind};
//!
//! let mut session = EditorSession::open(page_id, store, media, branding, EditorConfig::default()).await;
//!
//! let hero = session.add_section(SectionKind::Hero).await?;
//! let headline = FieldPath::field("headline");
//! let handle = session.begin_inline_edit(&hero, &headline)?.expect("not locked");
//! session.inline_mut(&hero, &headline).unwrap().input("Sale")?;
//! session.commit_inline(&hero, &headline, handle).await?;
//! ```

mod branding;
mod config;
mod errors;
mod fields;
mod inline;
mod linkage;
mod mutations;
mod notifications;
mod page;
mod selection;
mod session;

pub use branding::BrandingManager;
pub use config::{EditorConfig, CONFIG_FILE};
pub use errors::EditorError;
pub use fields::{
    apply_edit, find_field, render_fields, FieldControl, FieldEdit, RenderedField, RepeaterItem,
};
pub use inline::{
    ClipboardData, Commit, EditHandle, InlineError, InlineField, InlineKey, KeyResult,
};
pub use linkage::LinkDecision;
pub use mutations::{MutationError, MutationResult, PageMutation};
pub use notifications::{Level, Notification, Notifications};
pub use page::Page;
pub use selection::{Dialog, Focus, Interaction, Key, KeyAction, PointerTarget};
pub use session::{CommandOutcome, EditorSession, PendingDecision, Refusal};
