use crate::error::StoreError;

/// Result type returned by collaborator calls
pub type StoreResult<T> = Result<T, StoreError>;
