//! Vector index error types.

use thiserror::Error;

/// Errors that can occur during vector index operations.
#[derive(Debug, Clone, Error)]
pub enum VectorIndexError {
    /// Validation error (e.g. vector length does not match the collection).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish connection to the vector index.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create or inspect the collection.
    #[error("Collection error: {0}")]
    CollectionError(String),

    /// Upsert of points failed.
    #[error("Upsert error: {0}")]
    UpsertError(String),

    /// The operation did not finish in time.
    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

impl VectorIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a collection error.
    pub fn collection(msg: impl Into<String>) -> Self {
        Self::CollectionError(msg.into())
    }

    /// Create an upsert error.
    pub fn upsert(msg: impl Into<String>) -> Self {
        Self::UpsertError(msg.into())
    }
}
