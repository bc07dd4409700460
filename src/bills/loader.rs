//! Recursive loading of bill documents under a key prefix.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt, pin_mut};
use thiserror::Error;

use crate::s3::{ObjectRef, S3Error, S3Service, stream_pages};

use super::resolver::DocumentResolver;
use super::types::EnrichedDocument;

/// Predicate deciding which listed objects become documents.
///
/// Evaluated against every listing entry before any fetch, so excluded
/// objects cost nothing beyond the listing itself.
pub type ObjectFilter = Box<dyn Fn(&ObjectRef) -> bool + Send + Sync>;

/// Errors that abort a whole load call.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A listing page could not be fetched or decoded.
    #[error("listing failed: {0}")]
    Listing(#[from] S3Error),
}

/// The outcome of one load call.
#[derive(Debug, Default)]
pub struct LoadedBatch {
    /// Documents resolved in listing order.
    pub documents: Vec<EnrichedDocument>,
    /// Matching objects dropped because their body fetch failed.
    pub skipped: usize,
}

/// Source-agnostic seam for bulk document loading.
#[async_trait]
pub trait DocumentLoader {
    /// Loads documents up to the implementation's configured bound.
    async fn load(&self) -> Result<LoadedBatch, LoadError>;
}

/// Loads every matching document under an object key prefix.
pub struct RecursiveS3Loader {
    store: Arc<S3Service>,
    prefix: String,
    filter: ObjectFilter,
    max_documents: usize,
}

impl RecursiveS3Loader {
    /// Creates a loader over `prefix`, bounded by `max_documents`.
    pub fn new(
        store: Arc<S3Service>,
        prefix: impl Into<String>,
        filter: ObjectFilter,
        max_documents: usize,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            filter,
            max_documents,
        }
    }
}

#[async_trait]
impl DocumentLoader for RecursiveS3Loader {
    /// Walks the paged listing in order, resolving matching objects one at a
    /// time.
    ///
    /// Loading stops the moment the budget is reached, even mid-page, and
    /// the page stream is dropped so no further listing request goes out. A
    /// budget of zero skips the listing entirely. Resolution failures skip
    /// the document; listing failures abort the call.
    async fn load(&self) -> Result<LoadedBatch, LoadError> {
        let mut batch = LoadedBatch::default();
        if self.max_documents == 0 {
            return Ok(batch);
        }

        let resolver = DocumentResolver::new(Arc::clone(&self.store));
        let pages = stream_pages(&self.store, &self.prefix);
        pin_mut!(pages);

        'pages: while let Some(page) = pages.next().await {
            let page = page?;
            for object in &page.entries {
                if !(self.filter)(object) {
                    continue;
                }

                match resolver.resolve(object).await {
                    Ok(document) => {
                        batch.documents.push(document);
                        if batch.documents.len() >= self.max_documents {
                            break 'pages;
                        }
                    }
                    Err(err) => {
                        batch.skipped += 1;
                        tracing::warn!(key = %object.key, error = %err, "Skipping document");
                    }
                }
            }
        }

        tracing::debug!(
            prefix = %self.prefix,
            documents = batch.documents.len(),
            skipped = batch.skipped,
            "Load finished"
        );
        Ok(batch)
    }
}
