//! Message types for the consumer.
//!
//! Defines the feed structures the catalog consumer works with.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use arxiv_indexer_shared::{PaperRecord, TopicCode};

/// A query against the catalog feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// Search expression, e.g. `cat:cs.AI OR cat:cs.CL`.
    pub search_query: String,
}

impl FeedQuery {
    /// Build a disjunctive category query over the given topics.
    pub fn for_topics(topics: &BTreeSet<TopicCode>) -> Self {
        let search_query = topics
            .iter()
            .map(TopicCode::query_term)
            .collect::<Vec<_>>()
            .join(" OR ");
        Self { search_query }
    }
}

/// One entry of a feed page, as published by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    /// Full entry id, e.g. `http://arxiv.org/abs/2401.01234v2`.
    pub entry_id: String,
    pub title: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub pdf_url: Option<String>,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub primary_category: String,
    pub categories: Vec<String>,
}

impl FeedEntry {
    /// Short identifier: the last path segment of the entry id.
    pub fn short_id(&self) -> &str {
        self.entry_id
            .rsplit('/')
            .next()
            .unwrap_or(self.entry_id.as_str())
    }

    /// Convert the entry into a paper record.
    pub fn into_record(self) -> PaperRecord {
        PaperRecord {
            id: self.short_id().to_string(),
            title: collapse_newlines(&self.title),
            summary: collapse_newlines(&self.summary),
            authors: self.authors,
            pdf_url: self.pdf_url,
            published_date: self.published,
            updated_date: self.updated,
            prime_category: self.primary_category,
            categories: self.categories.into_iter().collect(),
            arxiv_url: self.entry_id,
        }
    }
}

/// A page of feed results.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    /// Total result count advertised by the feed, if present.
    pub total_results: Option<usize>,
}

fn collapse_newlines(text: &str) -> String {
    text.trim().replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(entry_id: &str) -> FeedEntry {
        FeedEntry {
            entry_id: entry_id.to_string(),
            title: "Multi\nLine Title".to_string(),
            summary: "  First line\nsecond line\n".to_string(),
            authors: vec!["Grace Hopper".to_string()],
            pdf_url: None,
            published: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated: Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap(),
            primary_category: "cs.CL".to_string(),
            categories: vec!["cs.CL".to_string(), "cs.AI".to_string(), "cs.CL".to_string()],
        }
    }

    #[test]
    fn test_query_for_topics() {
        let topics = BTreeSet::from([TopicCode::Cv, TopicCode::Ai, TopicCode::Cl]);

        let query = FeedQuery::for_topics(&topics);

        assert_eq!(query.search_query, "cat:cs.AI OR cat:cs.CL OR cat:cs.CV");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(entry("http://arxiv.org/abs/2405.00001v2").short_id(), "2405.00001v2");
        assert_eq!(entry("http://arxiv.org/abs/hep-th/9901001v1").short_id(), "9901001v1");
    }

    #[test]
    fn test_into_record() {
        let record = entry("http://arxiv.org/abs/2405.00001v2").into_record();

        assert_eq!(record.id, "2405.00001v2");
        assert_eq!(record.arxiv_url, "http://arxiv.org/abs/2405.00001v2");
        assert_eq!(record.title, "Multi Line Title");
        assert_eq!(record.summary, "First line second line");
        assert_eq!(record.categories.len(), 2);
    }
}
