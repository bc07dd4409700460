//! Ingestion pipeline: document discovery, window splitting, and index writes.

mod service;
pub mod sink;
pub mod splitter;
pub mod types;

pub use service::{DEFAULT_MAX_DOCUMENTS, IngestionService, default_document_filter};
pub use sink::{IndexSink, QdrantIndexSink};
pub use splitter::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, TextSplitter};
pub use types::{ChunkRecord, PipelineError, RunSummary, SinkError, SplitterError};
