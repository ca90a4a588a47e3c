//! Error types for the editor

use pagecraft_common::StoreError;
use pagecraft_content::{ContentError, FieldIssue, SectionId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Backend error: {0}")]
    Store(#[from] StoreError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Inline edit error: {0}")]
    Inline(#[from] crate::inline::InlineError),

    #[error("Invalid content: {}", format_issues(.0))]
    Validation(Vec<FieldIssue>),

    #[error("Reusable component name must not be empty")]
    EmptyComponentName,

    #[error("Backend did not acknowledge {0}")]
    NotAcknowledged(&'static str),

    #[error("Section not found: {0}")]
    SectionNotFound(SectionId),

    #[error("Section {0} is not linked to a reusable component")]
    NotLinked(SectionId),

    #[error("Reusable component not found: {0}")]
    ComponentNotFound(String),

    #[error("Field {0} cannot be edited inline")]
    NotInlineEditable(String),

    #[error("No linked edit is waiting for a decision")]
    NoPendingDecision,

    #[error("Field edit does not match the schema: {0}")]
    InvalidEdit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
