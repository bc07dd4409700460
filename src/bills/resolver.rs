//! Resolution of listed objects into enriched documents.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::s3::{ObjectRef, S3Error, S3Service};

use super::metadata::{BillMetadata, VersionMetadata, bill_metadata_key, version_metadata_key};
use super::types::{DocumentMetadata, EnrichedDocument};

/// Errors that abort the resolution of a single document.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The primary text body could not be fetched.
    #[error("failed to fetch body for {key}: {source}")]
    Body {
        /// Object key of the document.
        key: String,
        /// Underlying store error.
        source: S3Error,
    },
}

/// Fetches document bodies and correlates their sibling metadata.
pub struct DocumentResolver {
    store: Arc<S3Service>,
}

impl DocumentResolver {
    /// Creates a resolver backed by `store`.
    pub fn new(store: Arc<S3Service>) -> Self {
        Self { store }
    }

    /// Resolves one listed object into an enriched document.
    ///
    /// The body fetch must succeed. The two sibling metadata fetches run
    /// concurrently, and each degrades to its default on failure so lineage
    /// gaps never block ingestion.
    pub async fn resolve(&self, object: &ObjectRef) -> Result<EnrichedDocument, ResolveError> {
        let content = self
            .store
            .get_object_text(&object.key)
            .await
            .map_err(|source| ResolveError::Body {
                key: object.key.clone(),
                source,
            })?;

        let version_key = version_metadata_key(&object.key);
        let bill_key = bill_metadata_key(&object.key);
        let (version, bill) = tokio::join!(
            self.fetch_metadata::<VersionMetadata>(&version_key),
            self.fetch_metadata::<BillMetadata>(&bill_key),
        );

        Ok(EnrichedDocument {
            content,
            metadata: DocumentMetadata::merge(&object.key, version, bill),
        })
    }

    async fn fetch_metadata<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.store.get_object_text(key).await {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(key, error = %err, "Metadata did not decode; continuing without it");
                    T::default()
                }
            },
            Err(err) => {
                tracing::debug!(key, error = %err, "Metadata unavailable; continuing without it");
                T::default()
            }
        }
    }
}
