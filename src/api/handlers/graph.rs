//! Graph construction handler.

use crate::services;
use crate::types::{GraphBuildRequest, GraphBuildResponse, Result};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tracing::warn;

/// Build the entity co-occurrence graph artifacts from a corpus file.
#[utoipa::path(
    post,
    path = "/api/graph/build",
    request_body = GraphBuildRequest,
    responses(
        (status = 200, description = "Graph artifacts written", body = GraphBuildResponse),
        (status = 404, description = "Corpus file not found")
    ),
    tag = "rag"
)]
pub async fn build_graph(
    State(state): State<AppState>,
    Json(payload): Json<GraphBuildRequest>,
) -> Result<Json<GraphBuildResponse>> {
    let summary = services::build_graph_index(&state, &payload.filename)
        .await
        .inspect_err(|e| warn!("build_graph_index: {}", e))?;

    Ok(Json(GraphBuildResponse {
        nodes: summary.nodes,
        edges: summary.edges,
    }))
}
