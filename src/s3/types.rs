//! Shared types for the object store layer.

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by object store operations.
#[derive(Debug, Error)]
pub enum S3Error {
    /// The configured endpoint or bucket produced an unusable URL.
    #[error("invalid S3 endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure reaching the object store.
    #[error("S3 request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The object store answered with a non-success status code.
    #[error("unexpected S3 status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the store.
        status: reqwest::StatusCode,
        /// Response body, useful for diagnosing access errors.
        body: String,
    },

    /// The listing response was not valid `ListBucketResult` XML.
    #[error("failed to decode listing XML: {0}")]
    Xml(#[from] quick_xml::DeError),
}

/// A single object surfaced by a bucket listing.
#[derive(Debug, Clone)]
pub struct ObjectRef {
    /// Full object key, relative to the bucket root.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last-modified timestamp as reported by the store.
    pub last_modified: Option<String>,
    /// Entity tag of the stored object.
    pub etag: Option<String>,
}

/// One page of listing results together with the continuation cursor.
#[derive(Debug, Clone)]
pub struct ObjectPage {
    /// Objects returned on this page, in listing order.
    pub entries: Vec<ObjectRef>,
    /// Cursor for the next page when the listing is truncated.
    pub next_token: Option<String>,
}

/// Deserialized `ListObjectsV2` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListBucketResult {
    #[serde(default)]
    pub(crate) is_truncated: bool,
    pub(crate) next_continuation_token: Option<String>,
    #[serde(default)]
    pub(crate) contents: Vec<ObjectEntry>,
}

/// A `Contents` element within a listing response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ObjectEntry {
    pub(crate) key: String,
    #[serde(default)]
    pub(crate) size: u64,
    pub(crate) last_modified: Option<String>,
    pub(crate) e_tag: Option<String>,
}

impl From<ObjectEntry> for ObjectRef {
    fn from(entry: ObjectEntry) -> Self {
        Self {
            key: entry.key,
            size: entry.size,
            last_modified: entry.last_modified,
            etag: entry.e_tag,
        }
    }
}
