//! Dependency initialization and wiring for the arXiv indexer.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Settings;
use crate::IndexingError;
use arxiv_indexer_pipeline::{
    consumer::{ArxivFeed, CatalogClient},
    gateway::RecordGateway,
    loader::VectorIndexer,
    orchestrator::{Orchestrator, OrchestratorConfig},
    processor::EmbeddingBatcher,
};
use arxiv_indexer_repository::{
    CollectionConfig, GeminiConfig, GeminiEmbedder, IndexConfig, OpenSearchPaperStore, PaperStore,
    QdrantVectorIndex, VectorIndex,
};

/// Timeout for a single catalog feed request.
const FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// Container for all initialized dependencies.
///
/// Built once at startup; every client is shared through an `Arc`.
pub struct Dependencies {
    /// Paper document store, also used by the front door.
    pub store: Arc<dyn PaperStore>,
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Connect to every external service and wire the pipeline.
    ///
    /// The document store and vector index are checked for reachability and
    /// bootstrapped (index and collection created if missing).
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If a client cannot be built or a service is unreachable
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            qdrant_url = %settings.qdrant_url,
            papers_index = %settings.papers_index,
            collection = %settings.qdrant_collection,
            vector_size = settings.vector_size,
            "Initializing dependencies"
        );

        // Document store
        let store = OpenSearchPaperStore::new(
            &settings.opensearch_url,
            IndexConfig::new(settings.papers_index.clone()),
        )
        .await
        .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let healthy = store
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;
        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }
        store.ensure_index_exists().await?;

        info!("OpenSearch connection verified");

        // Vector index
        let index = QdrantVectorIndex::new(
            &settings.qdrant_url,
            settings.qdrant_api_key.clone(),
            CollectionConfig::new(settings.qdrant_collection.clone(), settings.vector_size),
        )?;

        let healthy = index
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("Qdrant health check failed: {}", e)))?;
        if !healthy {
            return Err(IndexingError::config("Qdrant is unhealthy"));
        }
        index.ensure_collection_exists().await?;

        info!("Qdrant connection verified");

        // Embedding provider and catalog feed
        let embedder = GeminiEmbedder::new(
            GeminiConfig::new(settings.google_api_key.clone())
                .with_model(settings.embedding_model.clone()),
        )?;
        let feed = ArxivFeed::new(FEED_TIMEOUT)?;

        let store: Arc<dyn PaperStore> = Arc::new(store);
        let index: Arc<dyn VectorIndex> = Arc::new(index);

        let orchestrator = Orchestrator::with_config(
            CatalogClient::new(Arc::new(feed)),
            RecordGateway::new(store.clone()),
            EmbeddingBatcher::new(Arc::new(embedder)),
            VectorIndexer::new(index),
            OrchestratorConfig {
                topics: settings.topics.clone(),
                days_back: settings.days_back,
            },
        );

        Ok(Self {
            store,
            orchestrator,
        })
    }
}
