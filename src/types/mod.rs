//! Core types: API payloads, message roles, and error handling.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============= API Request/Response Types =============

/// Payload for querying the conversational model.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// User prompt to send to the RAG system.
    pub query: String,
}

/// Response structure for chat interactions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    /// Identifier for the chat session.
    pub chat_id: Uuid,
    /// Model-generated reply.
    pub response: String,
}

/// Payload for kicking off embedding generation over a corpus file.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmbedRequest {
    /// Corpus file name inside the configured corpus directory.
    pub filename: String,
    /// Preferred chunk size used during preprocessing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    /// Character overlap between consecutive chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap: Option<usize>,
}

/// Response after generating embeddings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmbedResponse {
    /// Count of chunks embedded and written to the output artifact.
    pub embedded_chunks: usize,
    /// Status message for the embedding job.
    pub message: String,
}

/// Payload for building the entity co-occurrence graph.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GraphBuildRequest {
    /// Corpus file name inside the configured corpus directory.
    pub filename: String,
}

/// Summary returned after graph artifacts are written.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GraphBuildResponse {
    /// Number of distinct entities observed.
    pub nodes: usize,
    /// Number of distinct co-occurrence edges.
    pub edges: usize,
}

/// Chat identifiers known to the conversation store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversationListResponse {
    /// Sorted chat session identifiers.
    pub chat_ids: Vec<String>,
}

/// Payload for exporting all conversations into one artifact.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportRequest {
    /// Destination file for the aggregate JSON-Lines export.
    pub destination: String,
}

/// Response after exporting conversations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    /// Number of conversations written to the destination.
    pub exported_chats: usize,
    /// Destination path the export was written to.
    pub destination: String,
}

// ============= Message Types =============

/// Role of a chat transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// One-time seed instruction for a chat session.
    System,
    /// Human-authored prompt.
    User,
    /// Model-generated reply.
    Assistant,
}

impl MessageRole {
    /// Wire-format name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

// ============= Error Types =============

/// Application error taxonomy.
///
/// Every variant propagates to the immediate caller unchanged; nothing is
/// retried internally. The only best-effort paths are inside the vector
/// store (restore on load failure, id-sidecar persistence), and those are
/// surfaced through [`crate::db::vector_store::StoreStatus`] rather than
/// swallowed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller supplied an invalid parameter combination (e.g. overlap >= chunk_size).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input failed validation: dimension mismatch, missing column, length mismatch.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced file or artifact is absent; the message names the expected path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required external service is unreachable. Distinct from validation so
    /// callers can tell "your input is wrong" from "the environment is broken".
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// Operation whose behavior is intentionally not yet defined.
    #[error("Not implemented: {0}")]
    Unimplemented(String),

    /// The chat or embedding service failed mid-call, or returned a malformed batch.
    #[error("LLM error: {0}")]
    Llm(String),

    /// I/O, serialization, or internal state failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Configuration(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DependencyUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Unimplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
            AppError::Llm(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(format!("I/O error: {}", e))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("Serialization error: {}", e))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let role: MessageRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, MessageRole::User);
    }

    #[test]
    fn unimplemented_maps_to_501() {
        let resp = AppError::Unimplemented("start_new_chat".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn validation_and_configuration_map_to_400() {
        let resp = AppError::Validation("dimension mismatch".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = AppError::Configuration("overlap too large".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn dependency_unavailable_maps_to_503() {
        let resp = AppError::DependencyUnavailable("ollama down".into()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
