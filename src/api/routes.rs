//! Router configuration and route definitions.

use crate::api::ApiDoc;
use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(crate::api::handlers::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_document))
        .route("/api/query", post(crate::api::handlers::chat::start_chat))
        .route(
            "/api/query/{chat_id}",
            post(crate::api::handlers::chat::continue_existing_chat),
        )
        .route("/api/embed", post(crate::api::handlers::embed::embed_corpus))
        .route(
            "/api/graph/build",
            post(crate::api::handlers::graph::build_graph),
        )
        .route(
            "/api/conversations",
            get(crate::api::handlers::conversations::list_conversations),
        )
        .route(
            "/api/conversations/export",
            post(crate::api::handlers::conversations::export_conversations),
        )
        .route(
            "/api/conversations/{chat_id}",
            get(crate::api::handlers::conversations::get_conversation),
        )
}
