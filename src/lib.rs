#![deny(missing_docs)]

//! Core library for the billdex ingestion pipeline.

/// Bill document discovery: key parsing, metadata resolution, recursive loading.
pub mod bills;
/// Environment-driven configuration management.
pub mod config;
/// Embedding client abstraction and adapters.
pub mod embedding;
/// Structured logging and tracing setup.
pub mod logging;
/// Ingestion metrics helpers.
pub mod metrics;
/// Chunking and indexing pipeline.
pub mod pipeline;
/// Qdrant vector store integration.
pub mod qdrant;
/// S3 object store client and pagination.
pub mod s3;
