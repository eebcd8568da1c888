//! Error types for the arXiv indexer pipeline.

use arxiv_indexer_repository::{EmbeddingError, StoreError, VectorIndexError};
use thiserror::Error;

/// Errors that can occur in the ingestion pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error talking to the catalog feed.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Error parsing or decoding feed data.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error from the document store.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Error from the embedding provider.
    #[error("Embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    /// Error from the vector index.
    #[error("Vector index error: {0}")]
    VectorIndexError(#[from] VectorIndexError),

    /// Vectors within one run do not share a length.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The vector index accepted fewer points than were embedded.
    #[error("Vector indexing incomplete: indexed {indexed} of {embedded} vectors")]
    IndexingIncomplete { embedded: usize, indexed: usize },

    /// A pipeline run was requested while another one is in progress.
    #[error("Pipeline run already in progress")]
    AlreadyRunning,
}

impl PipelineError {
    /// Create a catalog error.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::CatalogError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::CatalogError(err.to_string())
    }
}

impl From<quick_xml::Error> for PipelineError {
    fn from(err: quick_xml::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
