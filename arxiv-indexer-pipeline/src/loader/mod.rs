//! Loader module for the arXiv indexer pipeline.
//!
//! Loads embedded papers into the vector index.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

use arxiv_indexer_repository::{VectorIndex, VectorIndexError};
use arxiv_indexer_shared::{IndexedPoint, PaperRecord};

/// Configuration for the vector indexer.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Upper bound for the batched upsert call.
    pub upsert_timeout: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            upsert_timeout: Duration::from_secs(60),
        }
    }
}

/// Loader that upserts paper vectors with their payloads.
///
/// Point ids are derived from paper ids, so re-indexing a paper replaces
/// its existing point.
pub struct VectorIndexer {
    index: Arc<dyn VectorIndex>,
    config: IndexerConfig,
}

impl VectorIndexer {
    /// Create a new vector indexer with the given index.
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self::with_config(index, IndexerConfig::default())
    }

    /// Create a new vector indexer with custom configuration.
    pub fn with_config(index: Arc<dyn VectorIndex>, config: IndexerConfig) -> Self {
        Self { index, config }
    }

    /// Upsert one point per paper in a single call.
    ///
    /// Returns the number of points written; failures are logged and
    /// reported as zero.
    ///
    /// # Panics
    ///
    /// Panics if `records` and `vectors` differ in length.
    #[instrument(skip(self, records, vectors), fields(record_count = records.len()))]
    pub async fn index_all(&self, records: &[PaperRecord], vectors: Vec<Vec<f32>>) -> usize {
        assert_eq!(
            records.len(),
            vectors.len(),
            "every paper needs exactly one vector"
        );

        if records.is_empty() {
            return 0;
        }

        let expected = self.index.vector_size() as usize;
        if let Some(vector) = vectors.iter().find(|v| v.len() != expected) {
            error!(
                expected = expected,
                actual = vector.len(),
                "Embedding length does not match the collection, skipping upsert"
            );
            return 0;
        }

        let points: Vec<IndexedPoint> = records
            .iter()
            .zip(vectors)
            .map(|(record, vector)| IndexedPoint::new(record, vector))
            .collect();
        let count = points.len();

        match self.upsert_with_timeout(&points).await {
            Ok(()) => {
                info!(count = count, "Indexed paper vectors");
                count
            }
            Err(e) => {
                error!(error = %e, count = count, "Failed to upsert paper vectors");
                0
            }
        }
    }

    async fn upsert_with_timeout(&self, points: &[IndexedPoint]) -> Result<(), VectorIndexError> {
        tokio::time::timeout(self.config.upsert_timeout, self.index.upsert_points(points))
            .await
            .unwrap_or_else(|_| {
                Err(VectorIndexError::Timeout(
                    self.config.upsert_timeout.as_millis() as u64,
                ))
            })
    }
}
