//! Corpus embedding handler.

use crate::services;
use crate::types::{EmbedRequest, EmbedResponse, Result};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tracing::warn;

/// Trigger corpus chunking and embedding generation.
#[utoipa::path(
    post,
    path = "/api/embed",
    request_body = EmbedRequest,
    responses(
        (status = 200, description = "Embedding job completed", body = EmbedResponse),
        (status = 400, description = "Invalid chunking parameters or corpus shape"),
        (status = 404, description = "Corpus file not found"),
        (status = 503, description = "Embedding service unreachable")
    ),
    tag = "rag"
)]
pub async fn embed_corpus(
    State(state): State<AppState>,
    Json(payload): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>> {
    let chunk_size = payload.chunk_size.unwrap_or(state.config.rag.chunk_size);
    let overlap = payload.overlap.unwrap_or(state.config.rag.chunk_overlap);

    let embedded_chunks =
        services::embed_documents(&state, &payload.filename, chunk_size, overlap)
            .await
            .inspect_err(|e| warn!("embed_documents: {}", e))?;

    Ok(Json(EmbedResponse {
        embedded_chunks,
        message: format!("Embedding job completed for {}.", payload.filename),
    }))
}
