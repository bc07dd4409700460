//! Ingestion service coordinating discovery, splitting, and index writes.

use crate::{
    bills::{
        DocumentLoader, EnrichedDocument, ObjectFilter, RecursiveS3Loader, parse_bill_key,
    },
    config::get_config,
    metrics::{IngestMetrics, MetricsSnapshot},
    pipeline::{
        sink::IndexSink,
        splitter::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, TextSplitter},
        types::{ChunkRecord, PipelineError, RunSummary},
    },
    s3::S3Service,
};
use std::sync::Arc;

/// Cap on documents loaded per prefix when no override is configured.
pub const DEFAULT_MAX_DOCUMENTS: usize = 20_000;

/// Coordinates the full ingestion pipeline: discovery, enrichment, window
/// splitting, and index writes.
///
/// The service owns long-lived handles to the object store, the index sink,
/// and the metrics registry. Construct it once near process start and drive
/// it with [`IngestionService::run`].
pub struct IngestionService {
    store: Arc<S3Service>,
    sink: Box<dyn IndexSink>,
    splitter: TextSplitter,
    metrics: Arc<IngestMetrics>,
}

impl IngestionService {
    /// Build an ingestion service around an object store and a sink, taking
    /// splitter settings from the loaded configuration.
    pub fn new(store: Arc<S3Service>, sink: Box<dyn IndexSink>) -> Result<Self, PipelineError> {
        let config = get_config();
        let splitter = TextSplitter::new(
            config.text_splitter_chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            config
                .text_splitter_chunk_overlap
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
        )?;

        Ok(Self {
            store,
            sink,
            splitter,
            metrics: Arc::new(IngestMetrics::new()),
        })
    }

    /// Ingest a sequence of prefixes into the same namespace, stopping at the
    /// first failure.
    pub async fn run(
        &self,
        prefixes: &[String],
        namespace: &str,
        max_documents: usize,
    ) -> Result<RunSummary, PipelineError> {
        let mut summary = RunSummary::default();
        for prefix in prefixes {
            let prefix_summary = self.ingest_prefix(prefix, namespace, max_documents).await?;
            summary.absorb(prefix_summary);
        }
        Ok(summary)
    }

    /// Ingest every matching document under a single prefix.
    pub async fn ingest_prefix(
        &self,
        prefix: &str,
        namespace: &str,
        max_documents: usize,
    ) -> Result<RunSummary, PipelineError> {
        tracing::info!(prefix, namespace, max_documents, "Ingesting prefix");
        self.sink.ensure_namespace(namespace).await?;

        let loader = RecursiveS3Loader::new(
            Arc::clone(&self.store),
            prefix,
            default_document_filter(),
            max_documents,
        );
        let batch = loader.load().await?;

        let documents_loaded = batch.documents.len();
        let mut chunks_indexed = 0;
        for document in batch.documents {
            let indexed = self.index_document(namespace, document).await?;
            self.metrics.record_document(indexed as u64);
            chunks_indexed += indexed;
        }
        self.metrics.record_skipped(batch.skipped as u64);

        tracing::info!(
            prefix,
            namespace,
            documents = documents_loaded,
            skipped = batch.skipped,
            chunks = chunks_indexed,
            "Prefix ingested"
        );

        Ok(RunSummary {
            documents_loaded,
            documents_skipped: batch.skipped,
            chunks_indexed,
        })
    }

    async fn index_document(
        &self,
        namespace: &str,
        document: EnrichedDocument,
    ) -> Result<usize, PipelineError> {
        let EnrichedDocument { content, metadata } = document;
        let chunks: Vec<ChunkRecord> = self
            .splitter
            .split(&content)
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| ChunkRecord {
                text,
                chunk_index,
                metadata: metadata.clone(),
            })
            .collect();

        tracing::debug!(source = %metadata.source, chunks = chunks.len(), "Document split");
        Ok(self.sink.index(namespace, chunks).await?)
    }

    /// Return the current ingestion metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Filter selecting bill text documents whose key carries bill components.
pub fn default_document_filter() -> ObjectFilter {
    Box::new(|object| object.key.ends_with("document.txt") && parse_bill_key(&object.key).is_some())
}
