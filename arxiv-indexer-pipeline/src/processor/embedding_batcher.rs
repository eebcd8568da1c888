//! Embedding batcher implementation.
//!
//! Splits papers into fixed-size text batches and embeds them one batch at a
//! time, pacing consecutive provider calls.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::errors::PipelineError;
use arxiv_indexer_repository::{EmbeddingError, EmbeddingProvider};
use arxiv_indexer_shared::PaperRecord;

/// Configuration for the embedding batcher.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Maximum number of texts per provider call.
    pub batch_size: usize,
    /// Pause after each provider call.
    pub pacing_delay: Duration,
    /// Upper bound for a single provider call, retries included.
    pub request_timeout: Duration,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            pacing_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// Batches paper texts through an embedding provider.
pub struct EmbeddingBatcher {
    provider: Arc<dyn EmbeddingProvider>,
    config: EmbeddingConfig,
}

impl EmbeddingBatcher {
    /// Create a new batcher with default configuration.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(provider, EmbeddingConfig::default())
    }

    /// Create a new batcher with custom configuration.
    pub fn with_config(provider: Arc<dyn EmbeddingProvider>, config: EmbeddingConfig) -> Self {
        Self { provider, config }
    }

    /// Embed every paper, returning one vector per paper in input order.
    ///
    /// # Errors
    ///
    /// Any failed or timed out batch aborts the call. Vectors of differing
    /// lengths within one call yield `PipelineError::DimensionMismatch`.
    #[instrument(skip(self, records), fields(record_count = records.len(), model = self.provider.model()))]
    pub async fn embed_all(&self, records: &[PaperRecord]) -> Result<Vec<Vec<f32>>, PipelineError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = records.iter().map(PaperRecord::embedding_text).collect();
        let batch_size = self.config.batch_size.max(1);
        let batch_count = texts.len().div_ceil(batch_size);
        let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(texts.len());
        let mut dimension: Option<usize> = None;

        for (index, batch) in texts.chunks(batch_size).enumerate() {
            let embedded = tokio::time::timeout(
                self.config.request_timeout,
                self.provider.embed_batch(batch),
            )
            .await
            .map_err(|_| EmbeddingError::Timeout(self.config.request_timeout.as_millis() as u64))??;

            if embedded.len() != batch.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: batch.len(),
                    returned: embedded.len(),
                }
                .into());
            }

            for vector in embedded {
                match dimension {
                    None => {
                        info!(dimension = vector.len(), "Embedding dimension");
                        dimension = Some(vector.len());
                    }
                    Some(expected) if expected != vector.len() => {
                        return Err(PipelineError::DimensionMismatch {
                            expected,
                            actual: vector.len(),
                        });
                    }
                    Some(_) => {}
                }
                vectors.push(vector);
            }

            debug!(
                batch = index + 1,
                batches = batch_count,
                size = batch.len(),
                "Embedded batch"
            );
            tokio::time::sleep(self.config.pacing_delay).await;
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{paper, MockProvider};
    use std::sync::atomic::Ordering;

    fn papers(count: usize) -> Vec<PaperRecord> {
        (0..count).map(|i| paper(&format!("p{}", i))).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input() {
        let provider = Arc::new(MockProvider::new(4));
        let batcher = EmbeddingBatcher::new(provider.clone());

        let vectors = batcher.embed_all(&[]).await.unwrap();

        assert!(vectors.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_boundaries_and_order() {
        let provider = Arc::new(MockProvider::new(4));
        let batcher = EmbeddingBatcher::new(provider.clone());

        let vectors = batcher.embed_all(&papers(45)).await.unwrap();

        assert_eq!(*provider.batch_sizes.lock().await, vec![20, 20, 5]);
        assert_eq!(vectors.len(), 45);
        for (i, vector) in vectors.iter().enumerate() {
            assert_eq!(vector.len(), 4);
            assert_eq!(vector[0], i as f32);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sends_title_and_summary() {
        let provider = Arc::new(MockProvider::new(2));
        let batcher = EmbeddingBatcher::new(provider.clone());

        batcher.embed_all(&papers(1)).await.unwrap();

        let texts = provider.texts.lock().await;
        assert_eq!(texts[0], "Title: Paper p0\nSummary: Summary of p0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_failure_aborts() {
        let provider = Arc::new(MockProvider::new(4).failing_on_call(2));
        let batcher = EmbeddingBatcher::new(provider.clone());

        let result = batcher.embed_all(&papers(45)).await;

        assert!(matches!(result, Err(PipelineError::EmbeddingError(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_aborts() {
        let provider = Arc::new(MockProvider::new(4).with_latency(Duration::from_secs(600)));
        let batcher = EmbeddingBatcher::new(provider);

        let result = batcher.embed_all(&papers(3)).await;

        assert!(matches!(
            result,
            Err(PipelineError::EmbeddingError(EmbeddingError::Timeout(300_000)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_dimensions_rejected() {
        let provider = Arc::new(MockProvider::new(4).with_dimension_change(5, 8));
        let batcher = EmbeddingBatcher::new(provider);

        let result = batcher.embed_all(&papers(10)).await;

        assert!(matches!(
            result,
            Err(PipelineError::DimensionMismatch {
                expected: 4,
                actual: 8
            })
        ));
    }
}
