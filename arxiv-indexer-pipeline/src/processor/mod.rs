//! Processor module for the arXiv indexer pipeline.
//!
//! Turns newly stored papers into embedding vectors.

mod embedding_batcher;

pub use embedding_batcher::{EmbeddingBatcher, EmbeddingConfig};
