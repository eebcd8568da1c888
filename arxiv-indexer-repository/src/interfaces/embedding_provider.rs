//! Embedding provider trait definition.

use async_trait::async_trait;

use crate::errors::EmbeddingError;

/// Batched text to vector function.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// Implementations must return exactly one vector per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
