//! Paper record type.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One research paper as fetched from the catalog feed.
///
/// `id` is the catalog's short identifier (e.g. `2401.01234v2`) and is the
/// natural key for deduplication in the document store. Records are never
/// mutated after the catalog client builds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Catalog-assigned short identifier.
    pub id: String,
    /// Paper title with newlines collapsed.
    pub title: String,
    /// Abstract text with newlines collapsed.
    pub summary: String,
    /// Author names in the order listed by the catalog.
    pub authors: Vec<String>,
    /// Abstract page URL.
    pub arxiv_url: String,
    /// PDF URL, when the catalog advertises one.
    pub pdf_url: Option<String>,
    /// First version publication time.
    pub published_date: DateTime<Utc>,
    /// Latest version time.
    pub updated_date: DateTime<Utc>,
    /// Primary category term (e.g. `cs.AI`).
    pub prime_category: String,
    /// All category terms attached to the paper.
    pub categories: BTreeSet<String>,
}

impl PaperRecord {
    /// Text submitted to the embedding provider for this record.
    pub fn embedding_text(&self) -> String {
        format!("Title: {}\nSummary: {}", self.title, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_embedding_text_format() {
        let record = PaperRecord {
            id: "2401.00001v1".to_string(),
            title: "Attention Is Enough".to_string(),
            summary: "We revisit attention.".to_string(),
            authors: vec!["A. Author".to_string()],
            arxiv_url: "http://arxiv.org/abs/2401.00001v1".to_string(),
            pdf_url: None,
            published_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            prime_category: "cs.AI".to_string(),
            categories: BTreeSet::from(["cs.AI".to_string()]),
        };

        assert_eq!(
            record.embedding_text(),
            "Title: Attention Is Enough\nSummary: We revisit attention."
        );
    }
}
