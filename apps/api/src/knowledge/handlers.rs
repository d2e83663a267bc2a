use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::knowledge::RelevantContext;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ContextQuery {
    pub category: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub struct AddKnowledgeRequest {
    pub category: String,
    pub information: String,
}

/// GET /api/v1/knowledge/context
pub async fn handle_get_context(
    State(state): State<AppState>,
    Query(params): Query<ContextQuery>,
) -> Json<RelevantContext> {
    let context = state
        .knowledge
        .read()
        .await
        .relevant_context(&params.category.to_lowercase(), &params.title);
    Json(context)
}

/// GET /api/v1/knowledge/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<BTreeMap<String, usize>> {
    let stats = state.knowledge.read().await.stats();
    Json(stats)
}

/// POST /api/v1/knowledge
pub async fn handle_add_knowledge(
    State(state): State<AppState>,
    Json(req): Json<AddKnowledgeRequest>,
) -> Result<StatusCode, AppError> {
    state
        .knowledge
        .write()
        .await
        .add_knowledge(&req.category, &req.information)?;
    info!("Added knowledge to category {}", req.category.trim());
    Ok(StatusCode::CREATED)
}
