//! Retrieval-Augmented Generation pipeline components.
//!
//! # Module Structure
//!
//! - [`chunker`] - Recursive character chunking with deterministic ids
//! - [`embeddings`] - Embedding service client and batch generator
//! - [`pipeline`] - Corpus -> chunks -> embeddings -> JSONL artifact
//! - [`graph`] - Entity co-occurrence graph artifacts
//!
//! # Pipeline flow
//!
//! 1. **Ingestion** - corpus rows are chunked into overlapping snippets
//! 2. **Embedding** - one batched call to the embedding service
//! 3. **Output** - one JSON-Lines record per embedded chunk

pub mod chunker;
pub mod embeddings;
pub mod graph;
pub mod pipeline;

pub use chunker::{DocumentChunker, EmailChunks};
pub use embeddings::{EmbeddingClient, EmbeddingGenerator, OllamaEmbeddingClient};
pub use pipeline::{EmbeddingPipeline, EmbeddingRecord, PipelineReport};
