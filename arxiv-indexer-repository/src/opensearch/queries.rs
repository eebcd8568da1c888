//! OpenSearch query builders.

use serde_json::{json, Value};

use arxiv_indexer_shared::PaperRecord;
use tracing::warn;

/// Build a query returning the `limit` most recently published papers.
pub fn build_latest_query(limit: usize) -> Value {
    json!({
        "size": limit,
        "query": {
            "match_all": {}
        },
        "sort": [
            { "published_date": { "order": "desc" } }
        ]
    })
}

/// Extract paper records from a search response body.
///
/// Hits whose `_source` does not decode as a paper are skipped.
pub fn parse_hits(body: &Value) -> Vec<PaperRecord> {
    let hits = match body
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(|h| h.as_array())
    {
        Some(hits) => hits,
        None => return Vec::new(),
    };

    hits.iter()
        .filter_map(|hit| {
            let source = hit.get("_source")?.clone();
            match serde_json::from_value::<PaperRecord>(source) {
                Ok(paper) => Some(paper),
                Err(e) => {
                    warn!(
                        doc_id = hit.get("_id").and_then(|v| v.as_str()).unwrap_or("?"),
                        error = %e,
                        "Skipping undecodable paper document"
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_query() {
        let query = build_latest_query(20);

        assert_eq!(query["size"], 20);
        assert_eq!(query["sort"][0]["published_date"]["order"], "desc");
    }

    #[test]
    fn test_parse_hits() {
        let body = json!({
            "hits": {
                "hits": [
                    {
                        "_id": "2401.00001v1",
                        "_source": {
                            "id": "2401.00001v1",
                            "title": "A Paper",
                            "summary": "Text",
                            "authors": ["Ada"],
                            "arxiv_url": "http://arxiv.org/abs/2401.00001v1",
                            "pdf_url": null,
                            "published_date": "2024-01-01T00:00:00Z",
                            "updated_date": "2024-01-02T00:00:00Z",
                            "prime_category": "cs.AI",
                            "categories": ["cs.AI"]
                        }
                    },
                    {
                        "_id": "broken",
                        "_source": { "title": "Missing fields" }
                    }
                ]
            }
        });

        let papers = parse_hits(&body);

        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].id, "2401.00001v1");
        assert_eq!(papers[0].authors, vec!["Ada".to_string()]);
    }

    #[test]
    fn test_parse_hits_empty_body() {
        assert!(parse_hits(&json!({})).is_empty());
    }
}
