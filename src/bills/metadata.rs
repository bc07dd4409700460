//! Sibling metadata records published alongside bill documents.
//!
//! The congress scraper stores a `data.json` next to every `document.txt`
//! (version metadata) and another at the bill directory two levels above the
//! version directory (bill metadata). Both decode tolerantly: extra fields
//! are ignored and scalars that arrive as numbers coerce to strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Version-level metadata stored beside each `document.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionMetadata {
    /// Version code such as `ih` or `enr`.
    pub version_code: Option<String>,
    /// Upstream identifier for this text version.
    pub bill_version_id: Option<String>,
    /// Date the version was issued, `YYYY-MM-DD`.
    pub issued_on: Option<String>,
    /// Known source links for the version text, keyed by label.
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
}

impl VersionMetadata {
    /// Picks the canonical text link.
    ///
    /// The upstream scraper labels the canonical entry `unknown`; otherwise
    /// fall back to the lexicographically first label so the choice stays
    /// deterministic.
    pub fn select_url(&self) -> Option<String> {
        if let Some(url) = self.urls.get("unknown") {
            return Some(url.clone());
        }
        self.urls.values().next().cloned()
    }
}

/// Bill-level metadata stored at the bill directory root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillMetadata {
    /// Congress number, serialized upstream as either string or number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub congress: Option<String>,
    /// Upstream bill identifier such as `hr1-118`.
    pub bill_id: Option<String>,
    /// Date the bill was introduced.
    pub introduced_at: Option<String>,
    /// Bill number, serialized upstream as either string or number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: Option<String>,
    /// Official long title.
    pub official_title: Option<String>,
}

/// Key of the version-level `data.json`, in the same directory as the
/// document.
pub fn version_metadata_key(document_key: &str) -> String {
    sibling_at(document_key, 1)
}

/// Key of the bill-level `data.json`, two directories above the version
/// directory.
pub fn bill_metadata_key(document_key: &str) -> String {
    sibling_at(document_key, 3)
}

fn sibling_at(key: &str, levels_up: usize) -> String {
    let mut parts: Vec<&str> = key.split('/').collect();
    let keep = parts.len().saturating_sub(levels_up);
    parts.truncate(keep);
    if parts.is_empty() {
        "data.json".to_string()
    } else {
        format!("{}/data.json", parts.join("/"))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_KEY: &str = "raw/congress/data/118/bills/hr/hr1/text-versions/ih/document.txt";

    #[test]
    fn derives_both_sibling_keys() {
        assert_eq!(
            version_metadata_key(DOC_KEY),
            "raw/congress/data/118/bills/hr/hr1/text-versions/ih/data.json"
        );
        assert_eq!(
            bill_metadata_key(DOC_KEY),
            "raw/congress/data/118/bills/hr/hr1/data.json"
        );
    }

    #[test]
    fn decodes_bill_metadata_with_numeric_scalars() {
        let bill: BillMetadata = serde_json::from_str(
            r#"{
                "congress": 118,
                "bill_id": "hr1-118",
                "introduced_at": "2023-01-09",
                "number": 1,
                "official_title": "To lower energy costs.",
                "actions": [{"acted_at": "2023-01-09"}]
            }"#,
        )
        .expect("bill metadata");
        assert_eq!(bill.congress.as_deref(), Some("118"));
        assert_eq!(bill.number.as_deref(), Some("1"));
        assert_eq!(bill.official_title.as_deref(), Some("To lower energy costs."));
    }

    #[test]
    fn decodes_bill_metadata_with_string_scalars() {
        let bill: BillMetadata =
            serde_json::from_str(r#"{"congress": "110", "number": "2062"}"#).expect("bill metadata");
        assert_eq!(bill.congress.as_deref(), Some("110"));
        assert_eq!(bill.number.as_deref(), Some("2062"));
        assert!(bill.bill_id.is_none());
    }

    #[test]
    fn coerces_unexpected_scalar_shapes_to_absent() {
        let bill: BillMetadata =
            serde_json::from_str(r#"{"congress": ["118"], "number": null}"#).expect("bill metadata");
        assert!(bill.congress.is_none());
        assert!(bill.number.is_none());
    }

    #[test]
    fn prefers_the_unknown_url_label() {
        let version: VersionMetadata = serde_json::from_str(
            r#"{
                "version_code": "ih",
                "urls": {
                    "pdf": "https://example.gov/hr1.pdf",
                    "unknown": "https://example.gov/hr1.htm"
                }
            }"#,
        )
        .expect("version metadata");
        assert_eq!(
            version.select_url().as_deref(),
            Some("https://example.gov/hr1.htm")
        );
    }

    #[test]
    fn falls_back_to_the_first_label_in_order() {
        let version: VersionMetadata = serde_json::from_str(
            r#"{"urls": {"xml": "https://example.gov/hr1.xml", "pdf": "https://example.gov/hr1.pdf"}}"#,
        )
        .expect("version metadata");
        assert_eq!(
            version.select_url().as_deref(),
            Some("https://example.gov/hr1.pdf")
        );
    }

    #[test]
    fn handles_missing_urls_entirely() {
        let version: VersionMetadata =
            serde_json::from_str(r#"{"version_code": "enr"}"#).expect("version metadata");
        assert!(version.select_url().is_none());
        assert_eq!(version.version_code.as_deref(), Some("enr"));
    }
}
