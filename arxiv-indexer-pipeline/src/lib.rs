//! # arXiv Indexer Pipeline
//!
//! This crate provides the pipeline components that pull recent papers from
//! the arXiv catalog, store new ones, embed them and index the vectors.
//!
//! ## Architecture
//!
//! The pipeline runs each stage to completion before the next starts:
//!
//! 1. **Consumer**: Fetches recent papers from the catalog feed
//! 2. **Gateway**: Persists papers, keeping only the newly inserted ones
//! 3. **Processor**: Embeds new papers in paced, fixed-size batches
//! 4. **Loader**: Upserts the vectors with payloads into the vector index
//! 5. **Orchestrator**: Sequences the stages and contains their failures

pub mod consumer;
pub mod errors;
pub mod gateway;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use errors::PipelineError;

#[cfg(test)]
pub(crate) mod test_support;
