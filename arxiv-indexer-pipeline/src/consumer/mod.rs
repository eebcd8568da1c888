//! Consumer module for the arXiv indexer pipeline.
//!
//! Reads recent paper metadata from the arXiv catalog feed.

mod arxiv_feed;
mod atom;
mod catalog_client;
mod messages;

pub use arxiv_feed::{ArxivFeed, CatalogFeed, DEFAULT_FEED_URL};
pub use atom::parse_feed;
pub use catalog_client::{CatalogClient, CatalogConfig};
pub use messages::{FeedEntry, FeedPage, FeedQuery};
