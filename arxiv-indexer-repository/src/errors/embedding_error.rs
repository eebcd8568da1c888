//! Embedding provider error types.

use thiserror::Error;

/// Errors returned by an embedding provider.
#[derive(Error, Debug, Clone)]
pub enum EmbeddingError {
    /// Invalid client configuration (missing key, bad URL).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Transport-level failure talking to the provider.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The provider response could not be decoded.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provider returned a different number of vectors than inputs.
    #[error("Provider returned {returned} embeddings for {expected} inputs")]
    CountMismatch { expected: usize, returned: usize },

    /// The call did not finish in time.
    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

impl EmbeddingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
