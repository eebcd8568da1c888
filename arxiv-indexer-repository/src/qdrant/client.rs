//! Qdrant client implementation.
//!
//! This module provides the concrete implementation of `VectorIndex`
//! using the Qdrant gRPC client.

use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{debug, info, instrument};

use crate::errors::VectorIndexError;
use crate::interfaces::VectorIndex;
use arxiv_indexer_shared::IndexedPoint;

/// Default name of the paper vector collection.
pub const DEFAULT_COLLECTION_NAME: &str = "arxiv_vectors";

/// Configuration for the vector collection.
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    /// Collection the points are written to.
    pub name: String,
    /// Length of every vector in the collection.
    pub vector_size: u64,
    /// Upper bound for a single request to Qdrant.
    pub timeout: Duration,
}

impl CollectionConfig {
    /// Create a config for the given collection and vector size.
    pub fn new(name: impl Into<String>, vector_size: u64) -> Self {
        Self {
            name: name.into(),
            vector_size,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Qdrant-backed vector index.
///
/// Collections are created with cosine distance. Point ids are UUIDs, which
/// Qdrant accepts as its string id form.
pub struct QdrantVectorIndex {
    client: Qdrant,
    config: CollectionConfig,
}

impl QdrantVectorIndex {
    /// Create a new client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The Qdrant gRPC URL (e.g., "http://localhost:6334")
    /// * `api_key` - Optional API key for managed clusters
    /// * `config` - The collection configuration
    pub fn new(
        url: &str,
        api_key: Option<String>,
        config: CollectionConfig,
    ) -> Result<Self, VectorIndexError> {
        if config.vector_size == 0 {
            return Err(VectorIndexError::validation("vector size must be positive"));
        }

        let mut builder = Qdrant::from_url(url).timeout(config.timeout);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }

        let client = builder
            .build()
            .map_err(|e| VectorIndexError::connection(e.to_string()))?;

        info!(
            url = %url,
            collection = %config.name,
            vector_size = config.vector_size,
            "Created Qdrant client"
        );

        Ok(Self { client, config })
    }

    fn to_point_struct(point: &IndexedPoint) -> Result<PointStruct, VectorIndexError> {
        let payload_json = serde_json::to_value(&point.payload)
            .map_err(|e| VectorIndexError::validation(e.to_string()))?;
        let payload = Payload::try_from(payload_json)
            .map_err(|e| VectorIndexError::validation(e.to_string()))?;

        Ok(PointStruct::new(
            point.point_id.to_string(),
            point.vector.clone(),
            payload,
        ))
    }
}

#[async_trait]
impl VectorIndex for QdrantVectorIndex {
    async fn ensure_collection_exists(&self) -> Result<(), VectorIndexError> {
        let name = self.config.name.clone();

        let exists = self
            .client
            .collection_exists(name.clone())
            .await
            .map_err(|e| VectorIndexError::collection(e.to_string()))?;

        if exists {
            debug!(collection = %name, "Collection already exists");
            return Ok(());
        }

        info!(collection = %name, vector_size = self.config.vector_size, "Creating collection");

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name.clone()).vectors_config(
                    VectorParamsBuilder::new(self.config.vector_size, Distance::Cosine),
                ),
            )
            .await
            .map_err(|e| VectorIndexError::collection(e.to_string()))?;

        info!(collection = %name, "Collection created");
        Ok(())
    }

    #[instrument(skip(self, points), fields(point_count = points.len()))]
    async fn upsert_points(&self, points: &[IndexedPoint]) -> Result<(), VectorIndexError> {
        if points.is_empty() {
            return Ok(());
        }

        let structs = points
            .iter()
            .map(Self::to_point_struct)
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(self.config.name.clone(), structs).wait(true))
            .await
            .map_err(|e| VectorIndexError::upsert(e.to_string()))?;

        debug!(collection = %self.config.name, "Points upserted");
        Ok(())
    }

    fn vector_size(&self) -> u64 {
        self.config.vector_size
    }

    async fn health_check(&self) -> Result<bool, VectorIndexError> {
        self.client
            .health_check()
            .await
            .map(|_| true)
            .map_err(|e| VectorIndexError::connection(e.to_string()))
    }
}
