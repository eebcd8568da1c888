//! # arXiv Indexer
//!
//! Main library for the arXiv indexer.
//!
//! This crate provides the entry point, configuration and HTTP front door
//! for running the ingestion pipeline.

pub mod config;
pub mod server;
pub mod telemetry;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] arxiv_indexer_pipeline::PipelineError),

    /// Document store error.
    #[error("Store error: {0}")]
    StoreError(#[from] arxiv_indexer_repository::StoreError),

    /// Vector index error.
    #[error("Vector index error: {0}")]
    VectorIndexError(#[from] arxiv_indexer_repository::VectorIndexError),

    /// Embedding provider error.
    #[error("Embedding error: {0}")]
    EmbeddingError(#[from] arxiv_indexer_repository::EmbeddingError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
