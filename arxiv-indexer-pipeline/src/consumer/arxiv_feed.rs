//! HTTP access to the arXiv export API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::consumer::atom::parse_feed;
use crate::consumer::messages::{FeedPage, FeedQuery};
use crate::errors::PipelineError;

/// Default arXiv export API endpoint.
pub const DEFAULT_FEED_URL: &str = "https://export.arxiv.org/api/query";

/// Source of catalog feed pages.
///
/// Results are ordered by last-updated date, newest first.
#[async_trait]
pub trait CatalogFeed: Send + Sync {
    /// Fetch the page of results starting at offset `start`.
    async fn fetch_page(
        &self,
        query: &FeedQuery,
        start: usize,
        max_results: usize,
    ) -> Result<FeedPage, PipelineError>;
}

/// Catalog feed backed by the arXiv export API.
pub struct ArxivFeed {
    client: Client,
    url: String,
}

impl ArxivFeed {
    /// Create a feed client against the default endpoint.
    pub fn new(timeout: Duration) -> Result<Self, PipelineError> {
        Self::with_url(DEFAULT_FEED_URL, timeout)
    }

    /// Create a feed client against a custom endpoint.
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("arxiv-indexer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PipelineError::catalog(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CatalogFeed for ArxivFeed {
    async fn fetch_page(
        &self,
        query: &FeedQuery,
        start: usize,
        max_results: usize,
    ) -> Result<FeedPage, PipelineError> {
        let start = start.to_string();
        let max_results = max_results.to_string();

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("search_query", query.search_query.as_str()),
                ("start", start.as_str()),
                ("max_results", max_results.as_str()),
                ("sortBy", "lastUpdatedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::catalog(format!(
                "feed request failed with status {}",
                status
            )));
        }

        let body = response.text().await?;
        let page = parse_feed(&body)?;

        debug!(
            start = %start,
            entries = page.entries.len(),
            total_results = ?page.total_results,
            "Fetched feed page"
        );

        Ok(page)
    }
}
