//! # arXiv Indexer Shared
//!
//! Shared types used across the arXiv indexer crates: the paper record that
//! flows through the pipeline, the closed set of catalog topic codes, and the
//! point structure stored in the vector index.

mod paper;
mod point;
mod topic;

pub use paper::PaperRecord;
pub use point::{point_id_for, IndexedPoint, PointPayload};
pub use topic::{TopicCode, TopicCodeError};
