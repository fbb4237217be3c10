//! Conversational query handlers.

use crate::services;
use crate::types::{QueryRequest, QueryResponse, Result};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;
use uuid::Uuid;

/// Start a brand-new chat session.
#[utoipa::path(
    post,
    path = "/api/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Chat started", body = QueryResponse),
        (status = 501, description = "Service not implemented yet")
    ),
    tag = "chat"
)]
pub async fn start_chat(
    State(state): State<AppState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let (chat_id, response) = services::start_new_chat(&state, &payload.query)
        .await
        .inspect_err(|e| info!("start_new_chat: {}", e))?;

    Ok(Json(QueryResponse { chat_id, response }))
}

/// Continue an existing chat session using the provided chat id.
#[utoipa::path(
    post,
    path = "/api/query/{chat_id}",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Chat continued", body = QueryResponse),
        (status = 501, description = "Service not implemented yet")
    ),
    tag = "chat"
)]
pub async fn continue_existing_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<Uuid>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let response = services::continue_chat(&state, chat_id, &payload.query)
        .await
        .inspect_err(|e| info!("continue_chat: {}", e))?;

    Ok(Json(QueryResponse { chat_id, response }))
}
