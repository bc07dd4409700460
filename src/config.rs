use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the billdex pipeline.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Name of the bucket holding the scraped bill data.
    pub s3_bucket: String,
    /// Region the bucket lives in; part of the request signature.
    pub s3_region: String,
    /// Optional endpoint override (MinIO, localstack); switches to path-style addressing.
    pub s3_endpoint: Option<String>,
    /// Access key id for signed requests; unsigned requests are sent when absent.
    pub aws_access_key_id: Option<String>,
    /// Secret access key paired with the access key id.
    pub aws_secret_access_key: Option<String>,
    /// Optional session token for temporary credentials.
    pub aws_session_token: Option<String>,
    /// Optional `max-keys` override for listing requests.
    pub s3_page_size: Option<usize>,
    /// Base URL of the Qdrant instance that stores embeddings.
    pub qdrant_url: String,
    /// Name of the Qdrant collection documents are indexed into by default.
    pub qdrant_collection_name: String,
    /// Optional API key required to access Qdrant.
    pub qdrant_api_key: Option<String>,
    /// Embedding provider used to generate vector representations.
    pub embedding_provider: EmbeddingProvider,
    /// Embedding model identifier passed to the provider.
    pub embedding_model: String,
    /// Dimensionality of the produced vectors.
    pub embedding_dimension: usize,
    /// Optional override for the local Ollama runtime URL.
    pub ollama_url: Option<String>,
    /// API key used when the OpenAI provider is selected.
    pub openai_api_key: Option<String>,
    /// Optional base URL override for OpenAI-compatible endpoints.
    pub openai_base_url: Option<String>,
    /// Optional override for the splitter window size in characters.
    pub text_splitter_chunk_size: Option<usize>,
    /// Optional override for the splitter overlap in characters.
    pub text_splitter_chunk_overlap: Option<usize>,
    /// Optional cap on documents loaded per prefix.
    pub ingest_max_documents: Option<usize>,
}

/// Supported embedding backends for the indexing pipeline.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local Ollama runtime.
    Ollama,
    /// Hosted OpenAI embeddings API.
    OpenAI,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let aws_access_key_id = load_env_optional("AWS_ACCESS_KEY_ID");
        let aws_secret_access_key = load_env_optional("AWS_SECRET_ACCESS_KEY");
        match (&aws_access_key_id, &aws_secret_access_key) {
            (Some(_), None) => {
                return Err(ConfigError::MissingVariable(
                    "AWS_SECRET_ACCESS_KEY".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingVariable("AWS_ACCESS_KEY_ID".to_string()));
            }
            _ => {}
        }

        Ok(Self {
            s3_bucket: load_env("S3_BUCKET")?,
            s3_region: load_env_optional("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            s3_endpoint: load_env_optional("S3_ENDPOINT"),
            aws_access_key_id,
            aws_secret_access_key,
            aws_session_token: load_env_optional("AWS_SESSION_TOKEN"),
            s3_page_size: load_env_optional("S3_PAGE_SIZE")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("S3_PAGE_SIZE".to_string()))
                })
                .transpose()?,
            qdrant_url: load_env("QDRANT_URL")?,
            qdrant_collection_name: load_env("QDRANT_COLLECTION_NAME")?,
            qdrant_api_key: load_env_optional("QDRANT_API_KEY"),
            embedding_provider: load_env("EMBEDDING_PROVIDER")?.parse().map_err(|()| {
                ConfigError::InvalidValue("EMBEDDING_PROVIDER".to_string())
            })?,
            embedding_model: load_env("EMBEDDING_MODEL")?,
            embedding_dimension: load_env("EMBEDDING_DIMENSION")?.parse().map_err(|_| {
                ConfigError::InvalidValue("EMBEDDING_DIMENSION".to_string())
            })?,
            ollama_url: load_env_optional("OLLAMA_URL"),
            openai_api_key: load_env_optional("OPENAI_API_KEY"),
            openai_base_url: load_env_optional("OPENAI_BASE_URL"),
            text_splitter_chunk_size: load_env_optional("TEXT_SPLITTER_CHUNK_SIZE")
                .map(|value| {
                    value.parse().map_err(|_| {
                        ConfigError::InvalidValue("TEXT_SPLITTER_CHUNK_SIZE".to_string())
                    })
                })
                .transpose()?,
            text_splitter_chunk_overlap: load_env_optional("TEXT_SPLITTER_CHUNK_OVERLAP")
                .map(|value| {
                    value.parse().map_err(|_| {
                        ConfigError::InvalidValue("TEXT_SPLITTER_CHUNK_OVERLAP".to_string())
                    })
                })
                .transpose()?,
            ingest_max_documents: load_env_optional("INGEST_MAX_DOCUMENTS")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("INGEST_MAX_DOCUMENTS".to_string()))
                })
                .transpose()?,
        })
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        endpoint = ?config.s3_endpoint,
        collection = %config.qdrant_collection_name,
        embedding_provider = ?config.embedding_provider,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
