//! OpenSearch implementation of the paper store.
//!
//! This module provides a concrete implementation of `PaperStore`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchPaperStore;
pub use index_config::{IndexConfig, DEFAULT_INDEX_NAME};
