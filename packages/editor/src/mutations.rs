//! # Page Mutations
//!
//! Semantic operations on the ordered section list of a page.
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Adjacent swap of rank with the neighbour, never a renumbering
//! - No-op at the respective boundary
//! - Refused when either the section or the neighbour it would displace is locked
//!
//! ### SetContent / SetStyle / Unlink
//! - Atomic replacement, last write wins
//! - Content must have the section's kind
//!
//! ### Delete
//! - Removes the section; later ranks shift down to stay dense
//!
//! ### Locking
//! - A locked section refuses every mutation except `ToggleLock`
//! - `Append` and `Restore` only insert, so they never touch a locked section

use pagecraft_common::Direction;
use pagecraft_content::{Content, ReusableRef, Section, SectionId, SectionKind, StyleOverride};
use thiserror::Error;

/// Semantic page mutations
#[derive(Debug, Clone, PartialEq)]
pub enum PageMutation {
    /// Add a section at the end
    Append { section: Section },

    /// Re-insert a deleted section at `index`
    Restore { section: Section, index: usize },

    /// Swap rank with the adjacent section
    Move { id: SectionId, direction: Direction },

    ToggleVisibility { id: SectionId },

    ToggleLock { id: SectionId },

    Delete { id: SectionId },

    /// Replace a section's content
    SetContent { id: SectionId, content: Content },

    /// Replace a section's style override (never shared through a link)
    SetStyle {
        id: SectionId,
        style: Option<StyleOverride>,
    },

    /// Replace content and drop the reusable reference
    Unlink { id: SectionId, content: Content },

    /// Put back a snapshot of content, style and link
    Revert {
        id: SectionId,
        content: Content,
        style: Option<StyleOverride>,
        link: Option<ReusableRef>,
    },
}

impl PageMutation {
    /// Section the mutation targets
    pub fn target(&self) -> &SectionId {
        match self {
            PageMutation::Append { section } | PageMutation::Restore { section, .. } => &section.id,
            PageMutation::Move { id, .. }
            | PageMutation::ToggleVisibility { id }
            | PageMutation::ToggleLock { id }
            | PageMutation::Delete { id }
            | PageMutation::SetContent { id, .. }
            | PageMutation::SetStyle { id, .. }
            | PageMutation::Unlink { id, .. }
            | PageMutation::Revert { id, .. } => id,
        }
    }

    /// Debug name
    pub fn name(&self) -> &'static str {
        match self {
            PageMutation::Append { .. } => "append",
            PageMutation::Restore { .. } => "restore",
            PageMutation::Move { .. } => "move",
            PageMutation::ToggleVisibility { .. } => "toggle-visibility",
            PageMutation::ToggleLock { .. } => "toggle-lock",
            PageMutation::Delete { .. } => "delete",
            PageMutation::SetContent { .. } => "set-content",
            PageMutation::SetStyle { .. } => "set-style",
            PageMutation::Unlink { .. } => "unlink",
            PageMutation::Revert { .. } => "revert",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(SectionId),

    #[error("Section already on page: {0}")]
    DuplicateSection(SectionId),

    #[error("Section is locked: {0}")]
    SectionLocked(SectionId),

    #[error("Neighbouring section is locked: {0}")]
    NeighbourLocked(SectionId),

    #[error("Content for {actual} cannot be stored on a {expected} section")]
    KindMismatch {
        expected: SectionKind,
        actual: SectionKind,
    },
}

/// Result of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Page version after the mutation
    pub version: u64,

    /// False when the mutation was a no-op (e.g. moving the first section up)
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_and_name() {
        let mutation = PageMutation::Move {
            id: SectionId::new("s1"),
            direction: Direction::Up,
        };
        assert_eq!(mutation.target(), &SectionId::new("s1"));
        assert_eq!(mutation.name(), "move");
    }
}
