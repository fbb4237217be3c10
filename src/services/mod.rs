//! Domain service layer for the workshop operations.
//!
//! The conversational and graph-query operations are intentionally left
//! unimplemented for workshop participants to fill in; they fail
//! immediately with a distinct error so the HTTP layer can surface a 501.
//! Corpus embedding and graph construction are wired end to end.

use crate::rag::graph::{GraphBuilder, GraphSummary};
use crate::rag::pipeline::{read_corpus, EmbeddingPipeline};
use crate::rag::EmbeddingGenerator;
use crate::types::{AppError, Result};
use crate::AppState;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Initialize a new conversational session for the RAG workflow.
///
/// Will return the chat session UUID and the model response to the
/// initial query once implemented.
pub async fn start_new_chat(_state: &AppState, _user_query: &str) -> Result<(Uuid, String)> {
    Err(AppError::Unimplemented(
        "start_new_chat service not implemented".to_string(),
    ))
}

/// Continue an existing chat session by appending a new user query.
pub async fn continue_chat(
    _state: &AppState,
    _chat_id: Uuid,
    _user_query: &str,
) -> Result<String> {
    Err(AppError::Unimplemented(
        "continue_chat service not implemented".to_string(),
    ))
}

/// Answer a query against the co-occurrence graph artifacts.
pub async fn query_graph(_state: &AppState, _user_query: &str) -> Result<String> {
    Err(AppError::Unimplemented(
        "graph query service not implemented".to_string(),
    ))
}

/// Critique and refine a draft answer through a reflection loop.
pub async fn reflect_on_answer(_state: &AppState, _draft: &str) -> Result<String> {
    Err(AppError::Unimplemented(
        "reflective critique service not implemented".to_string(),
    ))
}

/// Chunk and embed a corpus file, writing the JSON-Lines artifact.
///
/// Returns the number of chunks embedded. `filename` is reduced to its
/// final path component before being resolved inside the corpus directory.
pub async fn embed_documents(
    state: &AppState,
    filename: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<usize> {
    let corpus_path = safe_corpus_path(&state.config.rag.corpus_dir, filename)?;
    let generator = EmbeddingGenerator::new(state.embedder.clone());
    let pipeline = EmbeddingPipeline::new(generator);

    let report = pipeline
        .run(
            &corpus_path,
            &state.config.rag.embeddings_output,
            chunk_size,
            overlap,
        )
        .await?;

    Ok(report.embedded_chunks)
}

/// Build the entity co-occurrence graph from a corpus file.
pub async fn build_graph_index(state: &AppState, filename: &str) -> Result<GraphSummary> {
    let corpus_path = safe_corpus_path(&state.config.rag.corpus_dir, filename)?;
    let records: Vec<(String, String)> = read_corpus(&corpus_path)?
        .into_iter()
        .map(|r| (r.file, r.message))
        .collect();

    GraphBuilder::build(&records, &state.config.rag.graph_output_dir)
}

// Strips any directory components so requests cannot escape the corpus dir.
fn safe_corpus_path(corpus_dir: &Path, filename: &str) -> Result<PathBuf> {
    let name = Path::new(filename)
        .file_name()
        .ok_or_else(|| AppError::Validation(format!("invalid corpus filename '{}'", filename)))?;
    Ok(corpus_dir.join(name))
}
