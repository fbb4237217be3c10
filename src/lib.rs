//! # RAGMILL - Retrieval-Augmented Generation workshop backend
//!
//! A thin web API wiring together document chunking, embedding generation,
//! vector search, an append-only conversation log, and a history-replay
//! chat agent. The conversational services are intentionally left as
//! workshop exercises; the supporting pipeline is fully implemented.
//!
//! ## Components
//!
//! - [`rag::chunker`] - Overlapping, bounded-size chunking with
//!   deterministic `"<source>::chunk-<n>"` ids
//! - [`rag::embeddings`] - Batched embedding generation over an injected
//!   [`rag::EmbeddingClient`]
//! - [`rag::pipeline`] - Corpus file -> chunks -> embeddings -> JSONL artifact
//! - [`rag::graph`] - Entity co-occurrence graph artifacts
//! - [`db::vector_store`] - Flat L2 index with id-aligned durable persistence
//! - [`db::conversations`] - One JSON-Lines transcript per chat id
//! - [`llm`] - Ollama chat client and the replay [`llm::ChatAgent`]
//! - [`api`] - Axum routes and handlers
//!
//! ## Library usage
//!
//! ```rust,ignore
//! use ragmill::db::VectorStore;
//!
//! let mut store = VectorStore::new(4096, Some("data/index.json".into()));
//! store.initialize()?;
//! store.add_embeddings(&[("doc-1".into(), embedding)])?;
//! let hits = store.query(&query_vector, 5)?;
//! ```
//!
//! ## Concurrency model
//!
//! Every operation is request-scoped and blocking: one external call is
//! issued and awaited to completion. The vector store performs no internal
//! locking; [`AppState`] keeps it behind a `tokio::sync::Mutex` to enforce
//! the single-writer discipline its persistence requires.

/// HTTP API handlers and routes.
pub mod api;
/// Storage backends (vector store, conversation log).
pub mod db;
/// Chat-completion clients and the replay agent.
pub mod llm;
/// RAG pipeline components (chunking, embeddings, graph).
pub mod rag;
/// Domain service layer (workshop operations).
pub mod services;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use db::{ConversationStore, StoredMessage, VectorStore};
pub use llm::{ChatAgent, ChatClient};
pub use rag::{DocumentChunker, EmbeddingClient, EmbeddingGenerator, EmbeddingPipeline};
pub use types::{AppError, MessageRole, Result};
pub use utils::Config;

use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Resolved application configuration.
    pub config: Arc<Config>,
    /// Append-only per-chat transcript store.
    pub conversations: Arc<ConversationStore>,
    /// History-replay chat agent (used by the workshop chat services).
    pub agent: Arc<ChatAgent>,
    /// Embedding service client driving the pipeline.
    pub embedder: Arc<dyn EmbeddingClient>,
    /// Vector store behind the external mutex its single-writer
    /// persistence discipline requires.
    pub vector_store: Arc<Mutex<VectorStore>>,
}
