//! Paper store trait definition.
//!
//! This module defines the abstract interface for the document store that
//! holds paper records, allowing the pipeline to be tested against mocks.

use async_trait::async_trait;

use crate::errors::StoreError;
use arxiv_indexer_shared::PaperRecord;

/// Abstract interface for the paper document store.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait PaperStore: Send + Sync {
    /// Insert a paper keyed by its `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The paper was newly stored
    /// * `Err(StoreError::DuplicateKey)` - A paper with this id already exists
    /// * `Err(StoreError)` - Any other store failure
    async fn insert(&self, paper: &PaperRecord) -> Result<(), StoreError>;

    /// Return up to `limit` papers, most recently published first.
    async fn latest(&self, limit: usize) -> Result<Vec<PaperRecord>, StoreError>;

    /// Ensure the paper index exists with proper mappings.
    ///
    /// This should be called during application startup.
    async fn ensure_index_exists(&self) -> Result<(), StoreError>;

    /// Check if the store is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the store is healthy
    /// * `Ok(false)` - If the store is unhealthy
    /// * `Err(StoreError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, StoreError>;
}
