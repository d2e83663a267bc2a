use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::model_matches;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LlmStatusResponse {
    pub connected: bool,
    pub base_url: String,
    pub model: String,
    pub llm_evaluation_enabled: bool,
}

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Deserialize)]
pub struct SetModelRequest {
    pub model: String,
}

/// GET /api/v1/llm/status
/// Runs a fresh health check against the inference server.
pub async fn handle_status(State(state): State<AppState>) -> Json<LlmStatusResponse> {
    let connected = state.llm.check_connection().await;
    Json(LlmStatusResponse {
        connected,
        base_url: state.llm.base_url().to_string(),
        model: state.llm.current_model().await,
        llm_evaluation_enabled: state.config.enable_llm_evaluation,
    })
}

/// GET /api/v1/llm/models
pub async fn handle_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.llm.available_models().await,
    })
}

/// PUT /api/v1/llm/model
///
/// Switches the generate model. A name the server's listing does not contain is
/// rejected, with a bare name matching its `:latest` tag. When the server is
/// offline or the listing is unusable the switch is accepted as-is.
pub async fn handle_set_model(
    State(state): State<AppState>,
    Json(req): Json<SetModelRequest>,
) -> Result<Json<LlmStatusResponse>, AppError> {
    let model = req.model.trim();
    if model.is_empty() {
        return Err(AppError::Validation("model cannot be empty".to_string()));
    }

    let connected = state.llm.check_connection().await;
    if connected {
        match state.llm.installed_models().await {
            Ok(installed) if !installed.is_empty() => {
                if !installed.iter().any(|m| model_matches(m, model)) {
                    return Err(AppError::NotFound(format!("Model {model} is not installed")));
                }
            }
            Ok(_) => warn!("Server lists no models, accepting {model} unchecked"),
            Err(e) => warn!("Could not verify model {model} ({e}), accepting it unchecked"),
        }
    }

    state.llm.set_model(model).await;

    Ok(Json(LlmStatusResponse {
        connected,
        base_url: state.llm.base_url().to_string(),
        model: model.to_string(),
        llm_evaluation_enabled: state.config.enable_llm_evaluation,
    }))
}
