//! Error types for storage operations

/// Error type for storage operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Record rejected by a storage-level constraint
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation failed in the backing store
    #[error("Operation error: {0}")]
    Operation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Operation(err.to_string())
    }
}
