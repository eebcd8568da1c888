//! Document store error types.
//!
//! This module defines the error types that can occur during paper store operations.

use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Failed to establish connection to the document store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A document with the same key already exists.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Failed to insert a document.
    #[error("Insert error: {0}")]
    InsertError(String),

    /// Query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to create the paper index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse response from the document store.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a document.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a duplicate key error for the given document id.
    pub fn duplicate_key(id: impl Into<String>) -> Self {
        Self::DuplicateKey(id.into())
    }

    /// Create an insert error.
    pub fn insert(msg: impl Into<String>) -> Self {
        Self::InsertError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether this error means the document was already stored.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}
