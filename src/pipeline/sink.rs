//! Index sink bridging the embedding provider and the Qdrant store.

use crate::config::get_config;
use crate::embedding::{EmbeddingClient, get_embedding_client};
use crate::pipeline::types::{ChunkRecord, SinkError};
use crate::qdrant::{PointInsert, QdrantService};
use async_trait::async_trait;

/// Destination for chunk batches produced by the ingestion pipeline.
#[async_trait]
pub trait IndexSink: Send + Sync {
    /// Create the namespace when it is missing from the backing store.
    async fn ensure_namespace(&self, namespace: &str) -> Result<(), SinkError>;

    /// Embed a batch of chunks and write it into the namespace.
    ///
    /// Returns the number of chunks written.
    async fn index(&self, namespace: &str, chunks: Vec<ChunkRecord>) -> Result<usize, SinkError>;
}

/// Sink that embeds chunks and writes them to a Qdrant collection.
pub struct QdrantIndexSink {
    pub(crate) qdrant: QdrantService,
    pub(crate) embedder: Box<dyn EmbeddingClient>,
    pub(crate) dimension: usize,
}

impl QdrantIndexSink {
    /// Build a sink from the configured Qdrant endpoint and embedding provider.
    pub fn new() -> Result<Self, SinkError> {
        let config = get_config();
        let embedder = get_embedding_client()?;
        let qdrant = QdrantService::new()?;
        Ok(Self {
            qdrant,
            embedder,
            dimension: config.embedding_dimension,
        })
    }
}

#[async_trait]
impl IndexSink for QdrantIndexSink {
    async fn ensure_namespace(&self, namespace: &str) -> Result<(), SinkError> {
        self.qdrant
            .create_collection_if_not_exists(namespace, self.dimension as u64)
            .await?;
        Ok(())
    }

    async fn index(&self, namespace: &str, chunks: Vec<ChunkRecord>) -> Result<usize, SinkError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = self.embedder.generate_embeddings(texts).await?;
        if let Some(vector) = embeddings.first()
            && vector.len() != self.dimension
        {
            return Err(SinkError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let points: Vec<PointInsert> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, vector)| PointInsert {
                text: chunk.text,
                chunk_index: chunk.chunk_index,
                metadata: chunk.metadata,
                vector,
            })
            .collect();

        let summary = self.qdrant.index_points(namespace, points).await?;
        Ok(summary.inserted)
    }
}
