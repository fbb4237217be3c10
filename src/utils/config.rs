//! Explicit application configuration.
//!
//! The core never reads the process environment; [`Config::from_env`] is the
//! single outer-layer adapter that resolves environment variables (with
//! `.env` support via dotenvy) into a plain struct passed at construction
//! time.

use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 512;
/// Default character overlap between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the Ollama-hosted chat and embedding models.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    /// Model identifier used for both chat and embeddings.
    pub model: String,
    /// Fully qualified base URL, e.g. `http://ollama:11434`.
    pub base_url: String,
}

/// Chunking, vector-store, and artifact-path settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Dimensionality the vector store is created with.
    pub vector_dimension: usize,
    /// Primary vector index artifact; the id sidecar lives at `<path>.ids.json`.
    pub vector_index_path: Option<PathBuf>,
    /// Directory holding one `<chat_id>.jsonl` transcript per chat.
    pub conversations_dir: PathBuf,
    /// Directory the corpus files are read from.
    pub corpus_dir: PathBuf,
    /// JSON-Lines embedding output artifact.
    pub embeddings_output: PathBuf,
    /// Directory the graph `nodes.jsonl`/`edges.jsonl` artifacts land in.
    pub graph_output_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration from the process environment.
    ///
    /// Every variable is optional; sensible workshop defaults apply.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", "8000")?,
            },
            ollama: OllamaConfig {
                model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1:8b".to_string()),
                base_url: env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| default_ollama_url()),
            },
            rag: RagConfig {
                chunk_size: parse_var("CHUNK_SIZE", &DEFAULT_CHUNK_SIZE.to_string())?,
                chunk_overlap: parse_var("CHUNK_OVERLAP", &DEFAULT_CHUNK_OVERLAP.to_string())?,
                vector_dimension: parse_var("VECTOR_DIMENSION", "4096")?,
                vector_index_path: env::var("VECTOR_INDEX_PATH").ok().map(PathBuf::from),
                conversations_dir: env::var("CONVERSATIONS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        PathBuf::from("outputs/advanced_rag/conversations")
                    }),
                corpus_dir: env::var("CORPUS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("data")),
                embeddings_output: env::var("EMBEDDINGS_OUTPUT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("outputs/embeddings.jsonl")),
                graph_output_dir: env::var("GRAPH_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("outputs/graph_rag")),
            },
        })
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|err| AppError::Configuration(format!("invalid {}={}: {}", name, raw, err)))
}

/// Compose the Ollama base URL from `OLLAMA_HOST`/`OLLAMA_PORT`.
///
/// Some setups specify the host with `host:port` already; respect it if present.
fn default_ollama_url() -> String {
    let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| "ollama".to_string());
    let port = env::var("OLLAMA_PORT").unwrap_or_else(|_| "11434".to_string());
    if host.contains(':') {
        format!("http://{}", host)
    } else {
        format!("http://{}:{}", host, port)
    }
}
