use pagecraft_content::ContentError;
use thiserror::Error;

/// Failure reported by an external collaborator (content store, media library,
/// branding source)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid stored content: {0}")]
    Content(#[from] ContentError),
}

impl StoreError {
    /// Whether the operator can fix this (e.g. by picking another name)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Conflict(_) | StoreError::NotFound(_))
    }
}
