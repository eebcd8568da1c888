//! Catalog client: pulls recent papers for a set of topics.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, error, info, instrument, warn};

use crate::consumer::arxiv_feed::CatalogFeed;
use crate::consumer::messages::{FeedPage, FeedQuery};
use crate::errors::PipelineError;
use arxiv_indexer_shared::{PaperRecord, TopicCode};

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Results requested per feed page.
    pub page_size: usize,
    /// Delay between consecutive feed requests, retries included.
    pub page_delay: Duration,
    /// Retries per page after the first failed attempt.
    pub max_retries: usize,
    /// Maximum number of results considered per call.
    pub max_results: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_delay: Duration::from_secs(3),
            max_retries: 3,
            max_results: 200,
        }
    }
}

/// Client that walks the catalog feed newest-first and collects recent papers.
pub struct CatalogClient {
    feed: Arc<dyn CatalogFeed>,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client with default configuration.
    pub fn new(feed: Arc<dyn CatalogFeed>) -> Self {
        Self::with_config(feed, CatalogConfig::default())
    }

    /// Create a new catalog client with custom configuration.
    pub fn with_config(feed: Arc<dyn CatalogFeed>, config: CatalogConfig) -> Self {
        Self { feed, config }
    }

    /// Fetch papers updated within the last `days_back` days.
    pub async fn fetch_recent(
        &self,
        topics: &BTreeSet<TopicCode>,
        days_back: u32,
    ) -> Vec<PaperRecord> {
        let today = Utc::now().date_naive();
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(days_back)))
            .unwrap_or(NaiveDate::MIN);
        self.fetch_recent_since(topics, cutoff).await
    }

    /// Fetch papers whose updated date is not before `cutoff`.
    ///
    /// Iteration stops at the first older entry; no further pages are
    /// requested after that. A short page ends the walk only when the feed
    /// advertises no total or the total has been reached. A fetch failure
    /// ends the walk and the records collected so far are returned.
    #[instrument(skip(self, topics), fields(topic_count = topics.len(), cutoff = %cutoff))]
    pub async fn fetch_recent_since(
        &self,
        topics: &BTreeSet<TopicCode>,
        cutoff: NaiveDate,
    ) -> Vec<PaperRecord> {
        if topics.is_empty() {
            warn!("No topics configured, skipping catalog fetch");
            return Vec::new();
        }

        let query = FeedQuery::for_topics(topics);
        info!(query = %query.search_query, "Fetching recent papers");

        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();
        let mut start = 0usize;

        'pages: while start < self.config.max_results {
            if start > 0 {
                tokio::time::sleep(self.config.page_delay).await;
            }

            let page_len = self.config.page_size.min(self.config.max_results - start);
            let page = match self.fetch_page_with_retry(&query, start, page_len).await {
                Ok(page) => page,
                Err(e) => {
                    error!(
                        error = %e,
                        start = start,
                        collected = records.len(),
                        "Catalog fetch failed, keeping partial results"
                    );
                    break;
                }
            };

            let received = page.entries.len();
            for entry in page.entries {
                if entry.updated.date_naive() < cutoff {
                    debug!(
                        entry_id = %entry.entry_id,
                        updated = %entry.updated,
                        "Reached entry older than cutoff"
                    );
                    break 'pages;
                }
                if seen.insert(entry.short_id().to_string()) {
                    records.push(entry.into_record());
                }
            }

            if received == 0 {
                break;
            }
            start += received;
            let exhausted = match page.total_results {
                Some(total) => start >= total,
                None => received < page_len,
            };
            if exhausted {
                break;
            }
        }

        info!(count = records.len(), "Catalog fetch complete");
        records
    }

    async fn fetch_page_with_retry(
        &self,
        query: &FeedQuery,
        start: usize,
        max_results: usize,
    ) -> Result<FeedPage, PipelineError> {
        let mut attempt = 0usize;
        loop {
            match self.feed.fetch_page(query, start, max_results).await {
                Ok(page)
                    if page.entries.is_empty()
                        && page.total_results.is_some_and(|total| start < total)
                        && attempt < self.config.max_retries =>
                {
                    attempt += 1;
                    warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        start = start,
                        total_results = ?page.total_results,
                        "Feed returned an empty page before the end, retrying"
                    );
                    tokio::time::sleep(self.config.page_delay).await;
                }
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        start = start,
                        error = %e,
                        "Feed request failed, retrying"
                    );
                    tokio::time::sleep(self.config.page_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
