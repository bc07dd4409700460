//! Core data types and error definitions for the ingestion pipeline.

use crate::bills::{DocumentMetadata, LoadError};
use crate::embedding::EmbeddingClientError;
use crate::qdrant::QdrantError;
use thiserror::Error;

/// Errors produced while splitting document text into windows.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Splitter configured with a zero-character window.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
    /// Overlap leaves no forward progress between windows.
    #[error("chunk overlap {overlap} must be smaller than the chunk size {window}")]
    InvalidOverlap {
        /// Window size in characters.
        window: usize,
        /// Requested overlap in characters.
        overlap: usize,
    },
}

/// Errors emitted while indexing chunk batches.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Embedding provider failed to produce vectors for the chunk batch.
    #[error("Failed to generate embeddings: {0}")]
    Embedding(#[from] EmbeddingClientError),
    /// Returned embedding dimension does not match configuration.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension configured for the index.
        expected: usize,
        /// Dimension produced by the provider.
        actual: usize,
    },
    /// Qdrant interaction failed during indexing.
    #[error("Qdrant request failed: {0}")]
    Qdrant(#[from] QdrantError),
}

/// Errors emitted by an end-to-end ingestion run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Listing the object store failed beyond recovery.
    #[error("Failed to load documents: {0}")]
    Load(#[from] LoadError),
    /// Splitter configuration was rejected.
    #[error("Failed to split document: {0}")]
    Split(#[from] SplitterError),
    /// Indexing a chunk batch failed.
    #[error("Failed to index chunks: {0}")]
    Index(#[from] SinkError),
}

/// A single window of document text prepared for indexing.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    /// Chunk text content.
    pub text: String,
    /// Zero-based position of the chunk within its document.
    pub chunk_index: usize,
    /// Metadata shared by every chunk of the document.
    pub metadata: DocumentMetadata,
}

/// Summary of a completed ingestion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Documents fetched, enriched, and indexed.
    pub documents_loaded: usize,
    /// Documents skipped because their body could not be fetched.
    pub documents_skipped: usize,
    /// Total number of chunks written to the index.
    pub chunks_indexed: usize,
}

impl RunSummary {
    /// Fold another summary into this one.
    pub fn absorb(&mut self, other: RunSummary) {
        self.documents_loaded += other.documents_loaded;
        self.documents_skipped += other.documents_skipped;
        self.chunks_indexed += other.chunks_indexed;
    }
}
