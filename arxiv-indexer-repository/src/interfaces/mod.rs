//! Interface definitions for the external services.
//!
//! This module defines the abstract traits that allow for dependency
//! injection and swappable backends in the ingestion pipeline.

mod embedding_provider;
mod paper_store;
mod vector_index;

pub use embedding_provider::EmbeddingProvider;
pub use paper_store::PaperStore;
pub use vector_index::VectorIndex;
