//! In-memory doubles for the pipeline's collaborators.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;

use crate::consumer::{CatalogFeed, FeedEntry, FeedPage, FeedQuery};
use crate::errors::PipelineError;
use arxiv_indexer_repository::{
    EmbeddingError, EmbeddingProvider, PaperStore, StoreError, VectorIndex, VectorIndexError,
};
use arxiv_indexer_shared::{IndexedPoint, PaperRecord};

pub(crate) fn paper(id: &str) -> PaperRecord {
    PaperRecord {
        id: id.to_string(),
        title: format!("Paper {}", id),
        summary: format!("Summary of {}", id),
        authors: vec!["Ada Lovelace".to_string()],
        arxiv_url: format!("http://arxiv.org/abs/{}", id),
        pdf_url: Some(format!("http://arxiv.org/pdf/{}", id)),
        published_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        updated_date: Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        prime_category: "cs.AI".to_string(),
        categories: BTreeSet::from(["cs.AI".to_string()]),
    }
}

pub(crate) fn feed_entry(id: &str, updated: DateTime<Utc>) -> FeedEntry {
    FeedEntry {
        entry_id: format!("http://arxiv.org/abs/{}", id),
        title: format!("Paper {}", id),
        summary: format!("Summary of {}", id),
        authors: vec!["Ada Lovelace".to_string()],
        pdf_url: None,
        published: updated,
        updated,
        primary_category: "cs.AI".to_string(),
        categories: vec!["cs.AI".to_string()],
    }
}

/// Feed that replays scripted pages and records every request.
pub(crate) struct MockFeed {
    pages: Mutex<VecDeque<Result<FeedPage, PipelineError>>>,
    pub requests: Mutex<Vec<(usize, usize)>>,
}

impl MockFeed {
    pub fn new(pages: Vec<Result<FeedPage, PipelineError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CatalogFeed for MockFeed {
    async fn fetch_page(
        &self,
        _query: &FeedQuery,
        start: usize,
        max_results: usize,
    ) -> Result<FeedPage, PipelineError> {
        self.requests.lock().await.push((start, max_results));
        self.pages
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(FeedPage::default()))
    }
}

/// Store keyed by paper id that rejects duplicates like the real one.
pub(crate) struct MockStore {
    records: Mutex<HashMap<String, PaperRecord>>,
    failing_ids: HashSet<String>,
    pub insert_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::failing_on(&[])
    }

    pub fn failing_on(ids: &[&str]) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            failing_ids: ids.iter().map(|id| id.to_string()).collect(),
            insert_calls: AtomicUsize::new(0),
        }
    }

    pub async fn preload(&self, ids: &[&str]) {
        let mut records = self.records.lock().await;
        for id in ids {
            records.insert(id.to_string(), paper(id));
        }
    }

    pub async fn stored_count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl PaperStore for MockStore {
    async fn insert(&self, paper: &PaperRecord) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_ids.contains(&paper.id) {
            return Err(StoreError::insert("simulated write failure"));
        }
        let mut records = self.records.lock().await;
        if records.contains_key(&paper.id) {
            return Err(StoreError::duplicate_key(paper.id.clone()));
        }
        records.insert(paper.id.clone(), paper.clone());
        Ok(())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<PaperRecord>, StoreError> {
        let mut papers: Vec<PaperRecord> = self.records.lock().await.values().cloned().collect();
        papers.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        papers.truncate(limit);
        Ok(papers)
    }

    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Provider whose vectors encode each text's position in the run.
pub(crate) struct MockProvider {
    dimension: usize,
    fail_on_call: Option<usize>,
    latency: Option<Duration>,
    dimension_change: Option<(usize, usize)>,
    produced: AtomicUsize,
    pub calls: AtomicUsize,
    pub batch_sizes: Mutex<Vec<usize>>,
    pub texts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_on_call: None,
            latency: None,
            dimension_change: None,
            produced: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            batch_sizes: Mutex::new(Vec::new()),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Fail the `call`-th request (1-based).
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Switch to `dimension` from the `from`-th text onwards.
    pub fn with_dimension_change(mut self, from: usize, dimension: usize) -> Self {
        self.dimension_change = Some((from, dimension));
        self
    }
}

#[async_trait]
impl EmbeddingProvider for MockProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.batch_sizes.lock().await.push(texts.len());
        self.texts.lock().await.extend(texts.iter().cloned());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_on_call == Some(call) {
            return Err(EmbeddingError::StatusError {
                status: 500,
                body: "simulated provider failure".to_string(),
            });
        }

        let offset = self.produced.fetch_add(texts.len(), Ordering::SeqCst);
        Ok((offset..offset + texts.len())
            .map(|position| {
                let dimension = match self.dimension_change {
                    Some((from, changed)) if position >= from => changed,
                    _ => self.dimension,
                };
                vec![position as f32; dimension]
            })
            .collect())
    }

    fn model(&self) -> &str {
        "mock-embedding"
    }
}

/// Vector index that keeps points in memory, keyed by point id.
pub(crate) struct MockIndex {
    vector_size: u64,
    fail: bool,
    latency: Option<Duration>,
    points: Mutex<HashMap<String, IndexedPoint>>,
    pub upserts: Mutex<Vec<Vec<IndexedPoint>>>,
    pub upsert_calls: AtomicUsize,
}

impl MockIndex {
    pub fn new(vector_size: u64) -> Self {
        Self {
            vector_size,
            fail: false,
            latency: None,
            points: Mutex::new(HashMap::new()),
            upserts: Mutex::new(Vec::new()),
            upsert_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn stored_count(&self) -> usize {
        self.points.lock().await.len()
    }
}

#[async_trait]
impl VectorIndex for MockIndex {
    async fn ensure_collection_exists(&self) -> Result<(), VectorIndexError> {
        Ok(())
    }

    async fn upsert_points(&self, points: &[IndexedPoint]) -> Result<(), VectorIndexError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail {
            return Err(VectorIndexError::upsert("simulated upsert failure"));
        }

        self.upserts.lock().await.push(points.to_vec());
        let mut stored = self.points.lock().await;
        for point in points {
            stored.insert(point.point_id.to_string(), point.clone());
        }
        Ok(())
    }

    fn vector_size(&self) -> u64 {
        self.vector_size
    }

    async fn health_check(&self) -> Result<bool, VectorIndexError> {
        Ok(true)
    }
}
