//! Qdrant implementation of the vector index.

mod client;

pub use client::{CollectionConfig, QdrantVectorIndex, DEFAULT_COLLECTION_NAME};
