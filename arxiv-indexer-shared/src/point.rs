//! Vector index point types.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PaperRecord;

/// Derive the vector index point id for a paper id.
///
/// The MD5 digest of the paper id is read as the 16 bytes of a UUID, so the
/// same paper always maps to the same point.
pub fn point_id_for(paper_id: &str) -> Uuid {
    let digest = Md5::digest(paper_id.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Uuid::from_bytes(bytes)
}

/// Metadata stored alongside each vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    pub paper_id: String,
    pub title: String,
    /// ISO-8601 publication timestamp.
    pub published_date: String,
    /// Primary category term.
    pub category: String,
    pub arxiv_url: String,
}

impl From<&PaperRecord> for PointPayload {
    fn from(record: &PaperRecord) -> Self {
        Self {
            paper_id: record.id.clone(),
            title: record.title.clone(),
            published_date: record.published_date.to_rfc3339(),
            category: record.prime_category.clone(),
            arxiv_url: record.arxiv_url.clone(),
        }
    }
}

/// A point ready to be upserted into the vector index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    pub point_id: Uuid,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

impl IndexedPoint {
    /// Build the point for a record and its embedding.
    pub fn new(record: &PaperRecord, vector: Vec<f32>) -> Self {
        Self {
            point_id: point_id_for(&record.id),
            vector,
            payload: PointPayload::from(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    #[test]
    fn test_point_id_is_md5_of_paper_id() {
        let id = point_id_for("2401.00001v1");
        let digest = Md5::digest("2401.00001v1".as_bytes());
        assert_eq!(id.as_bytes().as_slice(), digest.as_slice());
    }

    #[test]
    fn test_point_id_known_value() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(
            point_id_for("").to_string(),
            "d41d8cd9-8f00-b204-e980-0998ecf8427e"
        );
    }

    #[test]
    fn test_point_id_is_deterministic() {
        assert_eq!(point_id_for("2312.11111v3"), point_id_for("2312.11111v3"));
        assert_ne!(point_id_for("2312.11111v3"), point_id_for("2312.11111v2"));
    }

    #[test]
    fn test_payload_from_record() {
        let record = PaperRecord {
            id: "2401.00002v1".to_string(),
            title: "Sparse Mixtures".to_string(),
            summary: "Abstract".to_string(),
            authors: vec![],
            arxiv_url: "http://arxiv.org/abs/2401.00002v1".to_string(),
            pdf_url: Some("http://arxiv.org/pdf/2401.00002v1".to_string()),
            published_date: Utc.with_ymd_and_hms(2024, 1, 3, 12, 30, 0).unwrap(),
            updated_date: Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap(),
            prime_category: "cs.LG".to_string(),
            categories: BTreeSet::from(["cs.LG".to_string(), "cs.AI".to_string()]),
        };

        let point = IndexedPoint::new(&record, vec![0.1, 0.2]);

        assert_eq!(point.point_id, point_id_for("2401.00002v1"));
        assert_eq!(point.payload.paper_id, "2401.00002v1");
        assert_eq!(point.payload.category, "cs.LG");
        assert_eq!(point.payload.published_date, "2024-01-03T12:30:00+00:00");
        assert_eq!(point.vector, vec![0.1, 0.2]);
    }
}
