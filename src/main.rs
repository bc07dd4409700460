use anyhow::{Context, Result};
use billdex::{
    config::{self, get_config},
    logging,
    pipeline::{DEFAULT_MAX_DOCUMENTS, IngestionService, QdrantIndexSink},
    s3::S3Service,
};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "billdex",
    about = "Ingest congressional bill text from an object store into a Qdrant index"
)]
struct Cli {
    /// Object key prefixes to walk for bill documents.
    #[arg(required = true)]
    prefixes: Vec<String>,
    /// Target collection; defaults to QDRANT_COLLECTION_NAME.
    #[arg(long)]
    namespace: Option<String>,
    /// Upper bound on documents loaded per prefix.
    #[arg(long)]
    max_documents: Option<usize>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    config::init_config();
    logging::init_tracing();

    let config = get_config();
    let namespace = cli
        .namespace
        .unwrap_or_else(|| config.qdrant_collection_name.clone());
    let max_documents = cli
        .max_documents
        .or(config.ingest_max_documents)
        .unwrap_or(DEFAULT_MAX_DOCUMENTS);

    let store = Arc::new(S3Service::new().context("Failed to initialize object store client")?);
    let sink = QdrantIndexSink::new().context("Failed to initialize index sink")?;
    let service = IngestionService::new(store, Box::new(sink))
        .context("Failed to initialize ingestion service")?;

    let summary = service
        .run(&cli.prefixes, &namespace, max_documents)
        .await
        .context("Ingestion run failed")?;

    tracing::info!(
        documents = summary.documents_loaded,
        skipped = summary.documents_skipped,
        chunks = summary.chunks_indexed,
        namespace = %namespace,
        "Ingestion complete"
    );
    println!(
        "Indexed {} chunks from {} documents ({} skipped) into '{}'",
        summary.chunks_indexed, summary.documents_loaded, summary.documents_skipped, namespace
    );
    Ok(())
}
