//! # Pagecraft Content
//!
//! Content model shared by the page editor and its storage collaborators.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: FieldDefinitions per SectionKind    │
//! └─────────────────────────────────────────────┘
//!                     ↓ drives
//! ┌─────────────────────────────────────────────┐
//! │ content: Content sum type ↔ wire JSON       │
//! │  - one payload record per section kind      │
//! │  - defaults seeded from the schema          │
//! │  - validation of required/format rules      │
//! └─────────────────────────────────────────────┘
//!                     ↓ carried by
//! ┌─────────────────────────────────────────────┐
//! │ section: Section / ReusableComponent        │
//! │ style:   StyleOverride → EffectiveStyle     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_content::{Content, SectionKind};
//!
//! let hero = Content::default_for(SectionKind::Hero);
//! let wire = hero.to_wire().unwrap();
//! assert_eq!(Content::from_wire(SectionKind::Hero, wire).unwrap(), hero);
//! ```

mod content;
mod error;
mod ids;
mod kind;
mod path;
pub mod payloads;
mod schema;
mod section;
mod style;
pub mod validate;
pub mod visit;

pub use content::Content;
pub use error::ContentError;
pub use ids::{ComponentId, MediaId, PageId, SectionId};
pub use kind::SectionKind;
pub use path::{FieldPath, PathSegment};
pub use payloads::{ImageRef, Link};
pub use schema::{default_object, field_at, FieldDefinition, FieldKind, SelectOption};
pub use section::{ComponentRecord, ReusableComponent, ReusableRef, Section, SectionRecord};
pub use style::{resolve, EffectiveStyle, GlobalBranding, StyleOverride};
pub use validate::{validate, FieldIssue, Problem};
