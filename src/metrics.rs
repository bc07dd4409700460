use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing ingestion activity.
#[derive(Default)]
pub struct IngestMetrics {
    documents_loaded: AtomicU64,
    documents_skipped: AtomicU64,
    chunks_indexed: AtomicU64,
}

impl IngestMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a loaded document and the number of chunks indexed for it.
    pub fn record_document(&self, chunk_count: u64) {
        self.documents_loaded.fetch_add(1, Ordering::Relaxed);
        self.chunks_indexed.fetch_add(chunk_count, Ordering::Relaxed);
    }

    /// Record documents that were skipped because their body could not be fetched.
    pub fn record_skipped(&self, count: u64) {
        self.documents_skipped.fetch_add(count, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_loaded: self.documents_loaded.load(Ordering::Relaxed),
            documents_skipped: self.documents_skipped.load(Ordering::Relaxed),
            chunks_indexed: self.chunks_indexed.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of ingestion counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents loaded and indexed since startup.
    pub documents_loaded: u64,
    /// Number of documents skipped because their body fetch failed.
    pub documents_skipped: u64,
    /// Total chunk count produced across all indexed documents.
    pub chunks_indexed: u64,
}
