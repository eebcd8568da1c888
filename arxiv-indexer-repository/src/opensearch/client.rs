//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `PaperStore`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    CreateParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::StoreError;
use crate::interfaces::PaperStore;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries::{build_latest_query, parse_hits};
use arxiv_indexer_shared::PaperRecord;

/// HTTP status OpenSearch answers with when `_create` hits an existing id.
const STATUS_CONFLICT: u16 = 409;

/// OpenSearch-backed paper store.
///
/// Papers are written with the `_create` API so the paper id doubles as a
/// uniqueness constraint: a second insert of the same id is reported as
/// `StoreError::DuplicateKey` and leaves the stored document unchanged.
///
/// # Example
///
/// ```ignore
/// let store = OpenSearchPaperStore::new("http://localhost:9200", IndexConfig::default()).await?;
/// store.ensure_index_exists().await?;
/// match store.insert(&paper).await {
///     Ok(()) => println!("stored"),
///     Err(e) if e.is_duplicate_key() => println!("already present"),
///     Err(e) => return Err(e),
/// }
/// ```
pub struct OpenSearchPaperStore {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchPaperStore {
    /// Create a new store connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The paper index configuration
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchPaperStore)` - A new store instance
    /// * `Err(StoreError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, StoreError> {
        let parsed_url = Url::parse(url).map_err(|e| StoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch paper store"
        );

        Ok(Self {
            client,
            index_config,
        })
    }
}

#[async_trait]
impl PaperStore for OpenSearchPaperStore {
    #[instrument(skip(self, paper), fields(paper_id = %paper.id))]
    async fn insert(&self, paper: &PaperRecord) -> Result<(), StoreError> {
        let body =
            serde_json::to_value(paper).map_err(|e| StoreError::SerializationError(e.to_string()))?;

        let response = self
            .client
            .create(CreateParts::IndexId(&self.index_config.name, &paper.id))
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == STATUS_CONFLICT {
            return Err(StoreError::duplicate_key(paper.id.clone()));
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create request failed");
            return Err(StoreError::insert(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        debug!("Paper document created");
        Ok(())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<PaperRecord>, StoreError> {
        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_config.name]))
            .body(build_latest_query(limit))
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(StoreError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;

        Ok(parse_hits(&body))
    }

    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        let index = self.index_config.name.as_str();

        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        if exists.status_code().is_success() {
            debug!(index = %index, "Paper index already exists");
            return Ok(());
        }

        info!(index = %index, "Creating paper index");

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| StoreError::IndexCreationError(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another process may have created it between the two calls
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            return Err(StoreError::IndexCreationError(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Paper index created");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| StoreError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");

        Ok(status == "green" || status == "yellow")
    }
}
