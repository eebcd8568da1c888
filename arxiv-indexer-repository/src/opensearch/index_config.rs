//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the paper index.

use serde_json::{json, Value};

/// Default name of the paper index.
pub const DEFAULT_INDEX_NAME: &str = "arxiv_papers";

/// Configuration for the paper index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Name of the index papers are stored in.
    pub name: String,
}

impl IndexConfig {
    /// Create a config for the given index name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

/// Get the index settings and mappings for the paper index.
///
/// The configuration includes:
/// - **Keyword fields**: ids, categories and authors for exact filtering
/// - **Text fields**: title and summary for full-text search
/// - **Date fields**: published/updated timestamps, used for recency sorting
/// - URLs are stored but not indexed
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "title": {
                    "type": "text",
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                },
                "summary": {
                    "type": "text"
                },
                "authors": {
                    "type": "keyword"
                },
                "arxiv_url": {
                    "type": "keyword",
                    "index": false
                },
                "pdf_url": {
                    "type": "keyword",
                    "index": false
                },
                "published_date": {
                    "type": "date"
                },
                "updated_date": {
                    "type": "date"
                },
                "prime_category": {
                    "type": "keyword"
                },
                "categories": {
                    "type": "keyword"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        assert_eq!(settings["mappings"]["properties"]["id"]["type"], "keyword");
        assert_eq!(
            settings["mappings"]["properties"]["published_date"]["type"],
            "date"
        );
        assert_eq!(
            settings["mappings"]["properties"]["categories"]["type"],
            "keyword"
        );
        assert_eq!(
            settings["mappings"]["properties"]["pdf_url"]["index"],
            false
        );
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, "arxiv_papers");
    }
}
