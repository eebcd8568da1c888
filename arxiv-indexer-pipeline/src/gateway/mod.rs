//! Gateway module for the arXiv indexer pipeline.
//!
//! Persists candidate papers to the document store with at-most-once
//! insertion per paper id.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use arxiv_indexer_repository::PaperStore;
use arxiv_indexer_shared::PaperRecord;

/// Result of persisting a batch of candidate papers.
#[derive(Debug, Clone, Default)]
pub struct PersistOutcome {
    /// Papers stored for the first time, in input order.
    pub inserted: Vec<PaperRecord>,
    /// Papers skipped because their id was already stored.
    pub duplicates: usize,
    /// Papers skipped because of a store failure.
    pub failed: usize,
}

/// Gateway in front of the paper document store.
pub struct RecordGateway {
    store: Arc<dyn PaperStore>,
}

impl RecordGateway {
    /// Create a new gateway over the given store.
    pub fn new(store: Arc<dyn PaperStore>) -> Self {
        Self { store }
    }

    /// Insert each paper, keeping only the ones that were newly stored.
    ///
    /// Duplicate keys are expected and skipped quietly. Any other failure is
    /// logged and the remaining papers are still attempted.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn persist_new(&self, records: Vec<PaperRecord>) -> PersistOutcome {
        let mut outcome = PersistOutcome::default();
        if records.is_empty() {
            return outcome;
        }

        for record in records {
            match self.store.insert(&record).await {
                Ok(()) => outcome.inserted.push(record),
                Err(e) if e.is_duplicate_key() => {
                    debug!(paper_id = %record.id, "Paper already stored");
                    outcome.duplicates += 1;
                }
                Err(e) => {
                    error!(paper_id = %record.id, error = %e, "Failed to store paper");
                    outcome.failed += 1;
                }
            }
        }

        info!(
            inserted = outcome.inserted.len(),
            duplicates = outcome.duplicates,
            failed = outcome.failed,
            "Persisted papers"
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{paper, MockStore};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_empty_input_skips_store() {
        let store = Arc::new(MockStore::new());
        let gateway = RecordGateway::new(store.clone());

        let outcome = gateway.persist_new(Vec::new()).await;

        assert!(outcome.inserted.is_empty());
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let store = Arc::new(MockStore::new());
        let gateway = RecordGateway::new(store.clone());

        let first = gateway.persist_new(vec![paper("2405.00001v1")]).await;
        let second = gateway.persist_new(vec![paper("2405.00001v1")]).await;

        assert_eq!(first.inserted.len(), 1);
        assert!(second.inserted.is_empty());
        assert_eq!(second.duplicates, 1);
        assert_eq!(second.failed, 0);
        assert_eq!(store.stored_count().await, 1);
    }

    #[tokio::test]
    async fn test_failure_is_contained() {
        let store = Arc::new(MockStore::failing_on(&["p3"]));
        let gateway = RecordGateway::new(store.clone());
        let records: Vec<PaperRecord> = (0..10).map(|i| paper(&format!("p{}", i))).collect();

        let outcome = gateway.persist_new(records).await;

        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 10);
        assert_eq!(outcome.inserted.len(), 9);
        assert_eq!(outcome.failed, 1);
        assert!(outcome.inserted.iter().all(|r| r.id != "p3"));
        assert_eq!(outcome.inserted[3].id, "p4");
    }
}
