//! Enriched document records produced by resolution.

use serde::Serialize;

use super::metadata::{BillMetadata, VersionMetadata};

/// Merged metadata describing one bill text document.
///
/// Fields originate from the object key, the bill-level `data.json`, and the
/// version-level `data.json`. A source that failed to resolve leaves its
/// fields unset, and unset fields stay out of serialized payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMetadata {
    /// Object key the document was loaded from.
    pub source: String,
    /// Congress number, e.g. `118`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congress: Option<String>,
    /// Upstream bill identifier, e.g. `hr1-118`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    /// Date the bill was introduced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduced_at: Option<String>,
    /// Bill number within its congress and type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Official long title of the bill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_title: Option<String>,
    /// Version code of this text, e.g. `ih`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_version: Option<String>,
    /// Upstream identifier of this text version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_version_id: Option<String>,
    /// Date this version was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_version_issued_on: Option<String>,
    /// Canonical source link for this version's text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_version_url: Option<String>,
}

impl DocumentMetadata {
    /// Merges the two sibling metadata sources for the document at `source`.
    pub fn merge(source: &str, version: VersionMetadata, bill: BillMetadata) -> Self {
        let bill_version_url = version.select_url();
        Self {
            source: source.to_string(),
            congress: bill.congress,
            bill_id: bill.bill_id,
            introduced_at: bill.introduced_at,
            number: bill.number,
            official_title: bill.official_title,
            bill_version: version.version_code,
            bill_version_id: version.bill_version_id,
            bill_version_issued_on: version.issued_on,
            bill_version_url,
        }
    }
}

/// A document body together with its merged metadata.
#[derive(Debug, Clone)]
pub struct EnrichedDocument {
    /// Full text of the document.
    pub content: String,
    /// Merged lineage metadata.
    pub metadata: DocumentMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_combines_both_sources() {
        let version: VersionMetadata = serde_json::from_str(
            r#"{
                "version_code": "ih",
                "bill_version_id": "hr1-118-ih",
                "issued_on": "2023-01-09",
                "urls": {"unknown": "https://example.gov/hr1.htm"}
            }"#,
        )
        .expect("version metadata");
        let bill: BillMetadata = serde_json::from_str(
            r#"{"congress": "118", "bill_id": "hr1-118", "number": "1"}"#,
        )
        .expect("bill metadata");

        let merged = DocumentMetadata::merge("raw/doc.txt", version, bill);
        assert_eq!(merged.source, "raw/doc.txt");
        assert_eq!(merged.congress.as_deref(), Some("118"));
        assert_eq!(merged.bill_id.as_deref(), Some("hr1-118"));
        assert_eq!(merged.bill_version.as_deref(), Some("ih"));
        assert_eq!(merged.bill_version_id.as_deref(), Some("hr1-118-ih"));
        assert_eq!(merged.bill_version_issued_on.as_deref(), Some("2023-01-09"));
        assert_eq!(
            merged.bill_version_url.as_deref(),
            Some("https://example.gov/hr1.htm")
        );
        assert!(merged.introduced_at.is_none());
        assert!(merged.official_title.is_none());
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let metadata = DocumentMetadata {
            source: "raw/doc.txt".to_string(),
            congress: Some("118".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&metadata).expect("serialized metadata");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert_eq!(object["source"], "raw/doc.txt");
        assert_eq!(object["congress"], "118");
    }

    #[test]
    fn degraded_sources_merge_to_source_only_metadata() {
        let merged = DocumentMetadata::merge(
            "raw/doc.txt",
            VersionMetadata::default(),
            BillMetadata::default(),
        );
        assert_eq!(
            merged,
            DocumentMetadata {
                source: "raw/doc.txt".to_string(),
                ..Default::default()
            }
        );
    }
}
