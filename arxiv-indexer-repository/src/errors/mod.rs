//! Error types for the arXiv indexer repository.

mod embedding_error;
mod store_error;
mod vector_index_error;

pub use embedding_error::EmbeddingError;
pub use store_error::StoreError;
pub use vector_index_error::VectorIndexError;
