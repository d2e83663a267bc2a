//! Axum route handlers for the Evaluation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::heuristic::HeuristicEvaluator;
use crate::evaluation::tips::personalized_tips;
use crate::evaluation::AnswerEvaluator;
use crate::models::evaluation::EvaluationResult;
use crate::models::progress::UserProgress;
use crate::models::question::{Answer, Question};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub question: Question,
    pub answer: Answer,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tips: Vec<String>,
}

fn validate(request: &EvaluateRequest) -> Result<(), AppError> {
    if request.question.title.trim().is_empty() {
        return Err(AppError::Validation(
            "question.title cannot be empty".to_string(),
        ));
    }
    if request.answer.text.trim().is_empty() {
        return Err(AppError::Validation("answer.text cannot be empty".to_string()));
    }
    Ok(())
}

/// POST /api/v1/evaluations
///
/// Evaluates an answer with the engine selected at startup.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    validate(&request)?;

    let result = state
        .evaluator
        .evaluate(&request.question, &request.answer)
        .await;
    info!(
        "Evaluated {:?} answer: {}/100 via {:?}",
        request.question.category, result.score, result.engine
    );

    Ok(Json(result))
}

/// POST /api/v1/evaluations/heuristic
///
/// Always uses the rule-based engine, regardless of configuration.
pub async fn handle_evaluate_heuristic(
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    validate(&request)?;
    Ok(Json(
        HeuristicEvaluator
            .evaluate(&request.question, &request.answer)
            .await,
    ))
}

/// POST /api/v1/tips
pub async fn handle_tips(Json(progress): Json<UserProgress>) -> Json<TipsResponse> {
    Json(TipsResponse {
        tips: personalized_tips(&progress),
    })
}
