//! Process settings read from the environment.

use std::collections::BTreeSet;
use std::env;
use std::net::SocketAddr;

use crate::IndexingError;
use arxiv_indexer_repository::opensearch::DEFAULT_INDEX_NAME;
use arxiv_indexer_repository::qdrant::DEFAULT_COLLECTION_NAME;
use arxiv_indexer_repository::gemini::DEFAULT_MODEL;
use arxiv_indexer_shared::TopicCode;

/// Default topics ingested when `ARXIV_TOPICS` is unset.
const DEFAULT_TOPICS: &str = "AI,CL,CV";

/// Default recency window in days.
const DEFAULT_DAYS_BACK: u32 = 3;

/// Default front door bind address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Validated process settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub opensearch_url: String,
    pub papers_index: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub qdrant_collection: String,
    pub google_api_key: String,
    pub embedding_model: String,
    /// Length of every embedding vector; always positive.
    pub vector_size: u64,
    pub topics: BTreeSet<TopicCode>,
    pub days_back: u32,
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (required)
    /// - `QDRANT_URL`: Qdrant gRPC URL (required)
    /// - `GOOGLE_API_KEY`: Generative Language API key (required)
    /// - `VECTOR_SIZE`: embedding length, positive integer (required)
    /// - `QDRANT_API_KEY`: Qdrant API key (optional)
    /// - `PAPERS_INDEX`: document index name (default: arxiv_papers)
    /// - `QDRANT_COLLECTION`: vector collection name (default: arxiv_vectors)
    /// - `EMBEDDING_MODEL`: embedding model (default: text-embedding-004)
    /// - `ARXIV_TOPICS`: comma-separated topic codes (default: AI,CL,CV)
    /// - `ARXIV_DAYS_BACK`: recency window in days (default: 3)
    /// - `BIND_ADDR`: front door address (default: 0.0.0.0:8000)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            optional(key).ok_or_else(|| {
                IndexingError::config(format!("missing required environment variable {}", key))
            })
        };

        let opensearch_url = required("OPENSEARCH_URL")?;
        let qdrant_url = required("QDRANT_URL")?;
        let google_api_key = required("GOOGLE_API_KEY")?;

        let raw_size = required("VECTOR_SIZE")?;
        let vector_size = match raw_size.parse::<u64>() {
            Ok(size) if size > 0 => size,
            _ => {
                return Err(IndexingError::config(format!(
                    "VECTOR_SIZE must be a positive integer, got {:?}",
                    raw_size
                )))
            }
        };

        let topics: BTreeSet<TopicCode> =
            TopicCode::parse_list(&optional("ARXIV_TOPICS").unwrap_or_else(|| DEFAULT_TOPICS.to_string()))
                .map_err(|e| IndexingError::config(format!("invalid ARXIV_TOPICS: {}", e)))?
                .into_iter()
                .collect();
        if topics.is_empty() {
            return Err(IndexingError::config("ARXIV_TOPICS names no topics"));
        }

        let days_back = match optional("ARXIV_DAYS_BACK") {
            None => DEFAULT_DAYS_BACK,
            Some(raw) => match raw.parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    return Err(IndexingError::config(format!(
                        "ARXIV_DAYS_BACK must be a positive integer, got {:?}",
                        raw
                    )))
                }
            },
        };

        let raw_addr = optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|e| IndexingError::config(format!("invalid BIND_ADDR {:?}: {}", raw_addr, e)))?;

        Ok(Self {
            opensearch_url,
            papers_index: optional("PAPERS_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            qdrant_url,
            qdrant_api_key: optional("QDRANT_API_KEY"),
            qdrant_collection: optional("QDRANT_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
            google_api_key,
            embedding_model: optional("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            vector_size,
            topics,
            days_back,
            bind_addr,
        })
    }
}
