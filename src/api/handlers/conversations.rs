//! Conversation transcript handlers.

use crate::db::StoredMessage;
use crate::types::{
    AppError, ConversationListResponse, ExportRequest, ExportResponse, Result,
};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::path::PathBuf;

/// List all persisted chat identifiers.
#[utoipa::path(
    get,
    path = "/api/conversations",
    responses(
        (status = 200, description = "Sorted chat ids", body = ConversationListResponse)
    ),
    tag = "conversations"
)]
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ConversationListResponse>> {
    let chat_ids = state.conversations.list_chats()?;
    Ok(Json(ConversationListResponse { chat_ids }))
}

/// Full message history for one chat.
#[utoipa::path(
    get,
    path = "/api/conversations/{chat_id}",
    responses(
        (status = 200, description = "Messages in append order"),
        (status = 404, description = "Chat has never been recorded")
    ),
    tag = "conversations"
)]
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<StoredMessage>>> {
    let messages = state.conversations.load(&chat_id)?;
    if messages.is_empty() {
        return Err(AppError::NotFound(format!(
            "no conversation recorded for chat id '{}'",
            chat_id
        )));
    }
    Ok(Json(messages))
}

/// Export every conversation into one aggregate JSON-Lines artifact.
#[utoipa::path(
    post,
    path = "/api/conversations/export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Export written", body = ExportResponse)
    ),
    tag = "conversations"
)]
pub async fn export_conversations(
    State(state): State<AppState>,
    Json(payload): Json<ExportRequest>,
) -> Result<Json<ExportResponse>> {
    let destination = PathBuf::from(&payload.destination);
    let exported_chats = state.conversations.export(&destination)?;

    Ok(Json(ExportResponse {
        exported_chats,
        destination: payload.destination,
    }))
}
