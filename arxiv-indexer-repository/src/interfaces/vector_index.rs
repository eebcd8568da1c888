//! Vector index trait definition.

use async_trait::async_trait;

use crate::errors::VectorIndexError;
use arxiv_indexer_shared::IndexedPoint;

/// Abstract interface for a collection-oriented vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the target collection if it does not exist yet.
    ///
    /// Idempotent: an existing collection is left untouched.
    async fn ensure_collection_exists(&self) -> Result<(), VectorIndexError>;

    /// Upsert all points in a single call.
    ///
    /// A point whose id already exists has its vector and payload replaced.
    async fn upsert_points(&self, points: &[IndexedPoint]) -> Result<(), VectorIndexError>;

    /// Vector length the collection was configured with.
    fn vector_size(&self) -> u64;

    /// Check if the vector index is reachable.
    async fn health_check(&self) -> Result<bool, VectorIndexError>;
}
