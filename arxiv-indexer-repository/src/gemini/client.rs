//! Gemini embedding client.
//!
//! Talks to the Generative Language `batchEmbedContents` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::EmbeddingError;
use crate::interfaces::EmbeddingProvider;

/// Default Generative Language API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-004";

/// Task type requested for paper embeddings.
const TASK_TYPE: &str = "SEMANTIC_SIMILARITY";

/// Configuration for the Gemini embedding client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempts per batch for transient failures (429, 5xx, timeouts).
    pub max_retries: usize,
}

impl GeminiConfig {
    /// Create a config with default endpoint, model and retry policy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Async embeddings client for the Gemini API.
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: Client,
    endpoint: String,
    model_path: String,
    model: String,
    max_retries: usize,
    timeout_ms: u64,
}

impl GeminiEmbedder {
    /// Build a new client.
    pub fn new(config: GeminiConfig) -> Result<Self, EmbeddingError> {
        if config.api_key.trim().is_empty() {
            return Err(EmbeddingError::config("missing Gemini API key"));
        }
        if config.model.trim().is_empty() {
            return Err(EmbeddingError::config("missing Gemini model name"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(config.api_key.trim())
                .map_err(|_| EmbeddingError::config("invalid Gemini API key"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| EmbeddingError::config(format!("failed to build HTTP client: {}", e)))?;

        let model = config.model.trim().trim_start_matches("models/").to_string();
        let endpoint = format!(
            "{}/models/{}:batchEmbedContents",
            config.base_url.trim_end_matches('/'),
            model
        );

        Ok(Self {
            client,
            endpoint,
            model_path: format!("models/{}", model),
            model,
            max_retries: config.max_retries.max(1),
            timeout_ms: config.timeout.as_millis() as u64,
        })
    }

    fn build_request<'a>(&'a self, texts: &'a [String]) -> BatchEmbedRequest<'a> {
        BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: &self.model_path,
                    content: Content {
                        parts: vec![Part {
                            text: text.as_str(),
                        }],
                    },
                    task_type: TASK_TYPE,
                })
                .collect(),
        }
    }

    async fn send_once(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.build_request(texts))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout(self.timeout_ms)
                } else {
                    EmbeddingError::request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(EmbeddingError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: BatchEmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::parse(e.to_string()))?;

        parsed.into_vectors(texts.len())
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut attempt = 0usize;
        loop {
            match self.send_once(texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(e) if is_retryable(&e) && attempt + 1 < self.max_retries => {
                    attempt += 1;
                    let delay = retry_backoff(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Embedding request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    debug!(error = %e, "Embedding request failed");
                    return Err(e);
                }
            }
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn is_retryable(error: &EmbeddingError) -> bool {
    match error {
        EmbeddingError::StatusError { status, .. } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        EmbeddingError::RequestError(_) | EmbeddingError::Timeout(_) => true,
        EmbeddingError::ConfigError(_)
        | EmbeddingError::ParseError(_)
        | EmbeddingError::CountMismatch { .. } => false,
    }
}

fn retry_backoff(attempt: usize) -> Duration {
    let capped = attempt.min(5) as u32;
    Duration::from_millis(500 * (1 << capped))
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

impl BatchEmbedResponse {
    fn into_vectors(self, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.embeddings.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                returned: self.embeddings.len(),
            });
        }
        Ok(self.embeddings.into_iter().map(|e| e.values).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_api_key() {
        let result = GeminiEmbedder::new(GeminiConfig::new("  "));
        assert!(matches!(result, Err(EmbeddingError::ConfigError(_))));
    }

    #[test]
    fn test_endpoint_and_model_path() {
        let embedder =
            GeminiEmbedder::new(GeminiConfig::new("key").with_model("models/text-embedding-004"))
                .unwrap();

        assert_eq!(embedder.model(), "text-embedding-004");
        assert_eq!(
            embedder.endpoint,
            "https://generativelanguage.googleapis.com/v1beta/models/text-embedding-004:batchEmbedContents"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let embedder = GeminiEmbedder::new(GeminiConfig::new("key")).unwrap();
        let texts = vec!["Title: A\nSummary: B".to_string()];

        let body = serde_json::to_value(embedder.build_request(&texts)).unwrap();

        assert_eq!(body["requests"][0]["model"], "models/text-embedding-004");
        assert_eq!(body["requests"][0]["taskType"], "SEMANTIC_SIMILARITY");
        assert_eq!(
            body["requests"][0]["content"]["parts"][0]["text"],
            "Title: A\nSummary: B"
        );
    }

    #[test]
    fn test_response_count_mismatch() {
        let response: BatchEmbedResponse =
            serde_json::from_str(r#"{"embeddings": [{"values": [0.1, 0.2]}]}"#).unwrap();

        let err = response.into_vectors(2).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::CountMismatch {
                expected: 2,
                returned: 1
            }
        ));
    }

    #[test]
    fn test_retryable_statuses() {
        let rate_limited = EmbeddingError::StatusError {
            status: 429,
            body: String::new(),
        };
        let bad_request = EmbeddingError::StatusError {
            status: 400,
            body: String::new(),
        };

        assert!(is_retryable(&rate_limited));
        assert!(!is_retryable(&bad_request));
        assert!(is_retryable(&EmbeddingError::Timeout(60_000)));
    }
}
