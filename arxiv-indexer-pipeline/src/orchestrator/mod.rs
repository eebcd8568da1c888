//! Orchestrator module for the arXiv indexer pipeline.
//!
//! Coordinates the catalog client, record gateway, embedding batcher and
//! vector indexer for one ingestion run.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, instrument};

use crate::consumer::CatalogClient;
use crate::errors::PipelineError;
use crate::gateway::RecordGateway;
use crate::loader::VectorIndexer;
use crate::processor::EmbeddingBatcher;
use arxiv_indexer_shared::{PaperRecord, TopicCode};

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Catalog topics to ingest.
    pub topics: BTreeSet<TopicCode>,
    /// Recency window, in days.
    pub days_back: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            topics: BTreeSet::from([TopicCode::Ai, TopicCode::Cl, TopicCode::Cv]),
            days_back: 3,
        }
    }
}

/// Stages of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    FetchingCatalog,
    PersistingRecords,
    EmbeddingAndIndexing,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FetchingCatalog => "fetching_catalog",
            Self::PersistingRecords => "persisting_records",
            Self::EmbeddingAndIndexing => "embedding_and_indexing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Papers returned by the catalog.
    pub fetched: usize,
    /// Papers stored for the first time.
    pub inserted: usize,
    /// Vectors produced by the embedding stage.
    pub embedded: usize,
    /// Points written to the vector index.
    pub indexed: usize,
    /// States visited, in order.
    pub path: Vec<PipelineState>,
    /// Error that ended the embedding and indexing stage, if any; set as
    /// well when fewer vectors were indexed than embedded.
    pub error: Option<String>,
}

impl PipelineReport {
    fn new() -> Self {
        Self {
            fetched: 0,
            inserted: 0,
            embedded: 0,
            indexed: 0,
            path: vec![PipelineState::Idle],
            error: None,
        }
    }

    /// Last state reached.
    pub fn final_state(&self) -> PipelineState {
        self.path.last().copied().unwrap_or(PipelineState::Idle)
    }

    fn enter(&mut self, state: PipelineState) {
        info!(state = %state, "Pipeline state");
        self.path.push(state);
    }
}

/// Resets the run flag when a run ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Orchestrator that sequences the pipeline stages.
///
/// Stages run strictly one after another:
/// fetch, persist, then embed and index the newly stored papers.
pub struct Orchestrator {
    catalog: CatalogClient,
    gateway: RecordGateway,
    batcher: EmbeddingBatcher,
    indexer: VectorIndexer,
    config: OrchestratorConfig,
    running: AtomicBool,
}

impl Orchestrator {
    /// Create a new orchestrator with default configuration.
    pub fn new(
        catalog: CatalogClient,
        gateway: RecordGateway,
        batcher: EmbeddingBatcher,
        indexer: VectorIndexer,
    ) -> Self {
        Self::with_config(catalog, gateway, batcher, indexer, OrchestratorConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        catalog: CatalogClient,
        gateway: RecordGateway,
        batcher: EmbeddingBatcher,
        indexer: VectorIndexer,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            catalog,
            gateway,
            batcher,
            indexer,
            config,
            running: AtomicBool::new(false),
        }
    }

    /// Run the pipeline once.
    ///
    /// Failures inside the embedding and indexing stage are logged and
    /// recorded in the report; they do not surface as errors.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::AlreadyRunning` if another run is in progress.
    #[instrument(skip(self), fields(days_back = self.config.days_back))]
    pub async fn run_once(&self) -> Result<PipelineReport, PipelineError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PipelineError::AlreadyRunning);
        }
        let _guard = RunGuard(&self.running);

        info!("Starting ingestion run");
        let mut report = PipelineReport::new();

        report.enter(PipelineState::FetchingCatalog);
        let records = self
            .catalog
            .fetch_recent(&self.config.topics, self.config.days_back)
            .await;
        report.fetched = records.len();

        report.enter(PipelineState::PersistingRecords);
        let outcome = self.gateway.persist_new(records).await;
        report.inserted = outcome.inserted.len();

        if outcome.inserted.is_empty() {
            info!("No new papers, skipping embedding");
        } else {
            report.enter(PipelineState::EmbeddingAndIndexing);
            if let Err(e) = self.embed_and_index(&outcome.inserted, &mut report).await {
                error!(error = %e, "Embedding and indexing failed");
                report.error = Some(e.to_string());
            }
        }

        report.enter(PipelineState::Done);
        info!(
            fetched = report.fetched,
            inserted = report.inserted,
            embedded = report.embedded,
            indexed = report.indexed,
            "Ingestion run complete"
        );

        Ok(report)
    }

    async fn embed_and_index(
        &self,
        records: &[PaperRecord],
        report: &mut PipelineReport,
    ) -> Result<(), PipelineError> {
        let vectors = self.batcher.embed_all(records).await?;
        report.embedded = vectors.len();
        report.indexed = self.indexer.index_all(records, vectors).await;
        if report.indexed < report.embedded {
            return Err(PipelineError::IndexingIncomplete {
                embedded: report.embedded,
                indexed: report.indexed,
            });
        }
        Ok(())
    }
}
