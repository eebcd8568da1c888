//! Configuration and dependency wiring for the arXiv indexer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;
