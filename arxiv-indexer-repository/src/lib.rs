//! # arXiv Indexer Repository
//!
//! Traits and implementations for the external services the ingestion
//! pipeline talks to: the paper document store (OpenSearch), the vector index
//! (Qdrant) and the embedding provider (Gemini).

pub mod errors;
pub mod gemini;
pub mod interfaces;
pub mod opensearch;
pub mod qdrant;

pub use errors::{EmbeddingError, StoreError, VectorIndexError};
pub use gemini::{GeminiConfig, GeminiEmbedder};
pub use interfaces::{EmbeddingProvider, PaperStore, VectorIndex};
pub use opensearch::{IndexConfig, OpenSearchPaperStore};
pub use qdrant::{CollectionConfig, QdrantVectorIndex};
