//! Error types for the content model

use thiserror::Error;

use crate::SectionKind;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Unknown section type: {0}")]
    UnknownKind(String),

    #[error("Invalid {kind} content: {source}")]
    InvalidContent {
        kind: SectionKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Content for {actual} cannot be stored on a {expected} section")]
    KindMismatch {
        expected: SectionKind,
        actual: SectionKind,
    },

    #[error("Invalid style value for {field}: {value:?}")]
    InvalidStyle { field: &'static str, value: String },

    #[error("Invalid field path: {0}")]
    InvalidPath(String),

    #[error("Content must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
