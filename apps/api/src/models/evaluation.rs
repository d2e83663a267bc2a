use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which evaluation path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationEngine {
    Heuristic,
    Llm,
}

/// Evaluation of a single answer, returned once per evaluation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub id: Uuid,
    pub score: u32, // 0 – 100
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_feedback: String,
    pub criteria_scores: BTreeMap<String, u32>,
    pub engine: EvaluationEngine,
    pub evaluated_at: DateTime<Utc>,
}

/// Clamps any raw score into the 0 – 100 range.
pub fn clamp_score(raw: f64) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}
