//! HTTP API layer, built on Axum.
//!
//! # Endpoints
//!
//! ## Chat (`/api/query`)
//! - `POST /api/query` - Start a new chat session (501 while the workshop
//!   service is unimplemented)
//! - `POST /api/query/{chat_id}` - Continue an existing session
//!
//! ## RAG (`/api/embed`, `/api/graph`)
//! - `POST /api/embed` - Chunk and embed a corpus file
//! - `POST /api/graph/build` - Build the co-occurrence graph artifacts
//!
//! ## Conversations (`/api/conversations`)
//! - `GET  /api/conversations` - List chat ids
//! - `GET  /api/conversations/{chat_id}` - Full history for one chat
//! - `POST /api/conversations/export` - Aggregate JSON-Lines export
//!
//! ## Health
//! - `GET /healthz` - Liveness probe
//!
//! The aggregate OpenAPI document is served at `/api-docs/openapi.json`.

pub mod handlers;
pub mod routes;

pub use routes::create_router;

use crate::types::{
    ConversationListResponse, EmbedRequest, EmbedResponse, ExportRequest, ExportResponse,
    GraphBuildRequest, GraphBuildResponse, QueryRequest, QueryResponse,
};
use utoipa::OpenApi;

/// Aggregate OpenAPI document covering every route.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::chat::start_chat,
        handlers::chat::continue_existing_chat,
        handlers::embed::embed_corpus,
        handlers::graph::build_graph,
        handlers::conversations::list_conversations,
        handlers::conversations::get_conversation,
        handlers::conversations::export_conversations,
    ),
    components(schemas(
        QueryRequest,
        QueryResponse,
        EmbedRequest,
        EmbedResponse,
        GraphBuildRequest,
        GraphBuildResponse,
        ConversationListResponse,
        ExportRequest,
        ExportResponse,
    )),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "chat", description = "Conversational query sessions"),
        (name = "rag", description = "Corpus embedding and graph construction"),
        (name = "conversations", description = "Persisted transcripts")
    )
)]
pub struct ApiDoc;
