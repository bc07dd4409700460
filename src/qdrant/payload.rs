//! Helpers for constructing and hashing Qdrant payloads.

use crate::qdrant::types::PointInsert;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use uuid::Uuid;

/// Build the payload object stored alongside each indexed chunk.
///
/// Chunk-level fields come first, then the parent document's merged
/// metadata is flattened in. Metadata fields left unset by resolution never
/// appear in the payload.
pub(crate) fn build_payload(point: &PointInsert, timestamp_rfc3339: &str) -> Value {
    let mut payload = Map::new();
    payload.insert("text".into(), Value::String(point.text.clone()));
    payload.insert("chunk_index".into(), Value::from(point.chunk_index));
    payload.insert(
        "chunk_hash".into(),
        Value::String(compute_chunk_hash(&point.text)),
    );
    payload.insert(
        "indexed_at".into(),
        Value::String(timestamp_rfc3339.to_string()),
    );

    if let Ok(Value::Object(fields)) = serde_json::to_value(&point.metadata) {
        payload.extend(fields);
    }

    Value::Object(payload)
}

/// Compute a deterministic SHA-256 hash for the chunk text.
pub fn compute_chunk_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Current timestamp formatted for payload storage.
pub(crate) fn current_timestamp_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Construct an identifier suitable for Qdrant points.
pub(crate) fn generate_point_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bills::DocumentMetadata;

    fn sample_point() -> PointInsert {
        PointInsert {
            text: "Be it enacted by the Senate".to_string(),
            chunk_index: 1,
            metadata: DocumentMetadata {
                source: "raw/congress/data/118/bills/hr/hr1/text-versions/ih/document.txt"
                    .to_string(),
                congress: Some("118".to_string()),
                bill_id: Some("hr1-118".to_string()),
                ..Default::default()
            },
            vector: vec![0.1, 0.2],
        }
    }

    #[test]
    fn chunk_hash_is_stable() {
        let text = "Be it enacted";
        let h1 = compute_chunk_hash(text);
        let h2 = compute_chunk_hash(text);
        assert_eq!(h1, h2);
        assert!(!h1.is_empty());
    }

    #[test]
    fn timestamp_is_rfc3339_like() {
        let ts = current_timestamp_rfc3339();
        assert!(ts.contains('T') && ts.ends_with('Z'));
    }

    #[test]
    fn payload_flattens_document_metadata_after_chunk_fields() {
        let point = sample_point();
        let payload = build_payload(&point, "2025-01-01T00:00:00Z");

        assert_eq!(payload["text"], "Be it enacted by the Senate");
        assert_eq!(payload["chunk_index"], 1);
        assert_eq!(payload["chunk_hash"], compute_chunk_hash(&point.text));
        assert_eq!(payload["indexed_at"], "2025-01-01T00:00:00Z");
        assert_eq!(
            payload["source"],
            "raw/congress/data/118/bills/hr/hr1/text-versions/ih/document.txt"
        );
        assert_eq!(payload["congress"], "118");
        assert_eq!(payload["bill_id"], "hr1-118");
    }

    #[test]
    fn payload_omits_unresolved_metadata_fields() {
        let payload = build_payload(&sample_point(), "2025-01-01T00:00:00Z");
        let object = payload.as_object().expect("payload object");
        assert!(!object.contains_key("official_title"));
        assert!(!object.contains_key("bill_version"));
        assert!(!object.contains_key("bill_version_url"));
    }
}
