//! LLM evaluator — grades answers through the local inference server.
//!
//! Flow: check_connection → relevant context → prompt → generate →
//!       extract JSON → normalize.
//!
//! Any failure along the way falls back to the heuristic evaluator, so callers
//! always get a result. `engine` on the result tells which path produced it.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::evaluation::feedback::build_feedback;
use crate::evaluation::heuristic::{
    criteria_scores, evaluate_with_rng, is_short_answer, SHORT_ANSWER_CEILING,
};
use crate::evaluation::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::evaluation::AnswerEvaluator;
use crate::knowledge::{KnowledgeBase, RelevantContext};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_PREAMBLE};
use crate::llm_client::{extract_json_object, LlmClient};
use crate::models::evaluation::{clamp_score, EvaluationEngine, EvaluationResult};
use crate::models::question::{Answer, Question};

/// Shape the model is asked to return. Lenient: lists default to empty and
/// camelCase keys are accepted.
#[derive(Debug, Deserialize)]
pub struct LlmEvaluationPayload {
    pub score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, alias = "detailedFeedback", alias = "feedback")]
    pub detailed_feedback: String,
    #[serde(default, alias = "criteriaScores")]
    pub criteria_scores: BTreeMap<String, f64>,
}

pub struct LlmEvaluator {
    llm: LlmClient,
    knowledge: Arc<RwLock<KnowledgeBase>>,
}

impl LlmEvaluator {
    pub fn new(llm: LlmClient, knowledge: Arc<RwLock<KnowledgeBase>>) -> Self {
        Self { llm, knowledge }
    }
}

#[async_trait]
impl AnswerEvaluator for LlmEvaluator {
    async fn evaluate(&self, question: &Question, answer: &Answer) -> EvaluationResult {
        if !self.llm.check_connection().await {
            warn!("Inference server unreachable, using heuristic evaluation");
            return fallback(question, answer);
        }

        let context = self
            .knowledge
            .read()
            .await
            .relevant_context(question.category.as_str(), &question.title);
        let prompt = build_evaluation_prompt(question, answer, &context);

        let text = match self.llm.generate(&prompt, None).await {
            Ok(text) => text,
            Err(e) => {
                warn!("LLM evaluation failed ({e}), using heuristic evaluation");
                return fallback(question, answer);
            }
        };

        match parse_payload(&text) {
            Some(payload) => {
                let result = normalize(payload, question, answer);
                info!("LLM evaluation scored {}/100", result.score);
                result
            }
            None => {
                warn!("LLM returned no usable JSON, using heuristic evaluation");
                fallback(question, answer)
            }
        }
    }
}

fn fallback(question: &Question, answer: &Answer) -> EvaluationResult {
    evaluate_with_rng(question, answer, &mut rand::thread_rng())
}

/// Fills the evaluation template with the question, answer and reference context.
pub fn build_evaluation_prompt(
    question: &Question,
    answer: &Answer,
    context: &RelevantContext,
) -> String {
    let criteria = if question.evaluation_criteria.is_empty() {
        "(none)".to_string()
    } else {
        question.evaluation_criteria.join(", ")
    };

    let time_spent = answer.time_spent_secs.to_string();
    let time_limit = question.time_limit_minutes.to_string();

    fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("preamble", JSON_ONLY_PREAMBLE),
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("category", question.category.as_str()),
            ("difficulty", question.difficulty.as_str()),
            ("title", &question.title),
            ("description", &question.description),
            ("criteria", &criteria),
            ("time_spent", &time_spent),
            ("time_limit", &time_limit),
            ("answer", answer.text.trim()),
            ("context", &context.relevant_info),
        ],
    )
}

/// Single left-to-right pass over `template`: each `{name}` with a known name is
/// replaced by its value, and inserted values are never scanned again. Braces that
/// do not enclose a known name (the JSON schema) are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let known = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match known {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Extracts and deserializes the JSON payload embedded in model output.
pub fn parse_payload(text: &str) -> Option<LlmEvaluationPayload> {
    let json = extract_json_object(text)?;
    match serde_json::from_str(json) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("Failed to parse LLM evaluation JSON: {e}");
            None
        }
    }
}

/// Turns a model payload into a result that honors the same bounds as the heuristic path.
fn normalize(
    payload: LlmEvaluationPayload,
    question: &Question,
    answer: &Answer,
) -> EvaluationResult {
    let ceiling = if is_short_answer(answer) {
        SHORT_ANSWER_CEILING
    } else {
        100
    };
    let score = clamp_score(payload.score).min(ceiling);

    let mut criteria: BTreeMap<String, u32> = heuristic_criteria(question, answer);
    for (label, value) in payload.criteria_scores {
        if let Some(slot) = criteria.get_mut(&label) {
            *slot = clamp_score(value).min(ceiling);
        }
    }

    let detailed_feedback = if payload.detailed_feedback.trim().is_empty() {
        build_feedback(question, answer, score).detailed_feedback
    } else {
        payload.detailed_feedback.trim().to_string()
    };

    EvaluationResult {
        id: Uuid::new_v4(),
        score,
        strengths: non_blank(payload.strengths),
        improvements: non_blank(payload.improvements),
        suggestions: non_blank(payload.suggestions),
        detailed_feedback,
        criteria_scores: criteria,
        engine: EvaluationEngine::Llm,
        evaluated_at: Utc::now(),
    }
}

fn heuristic_criteria(question: &Question, answer: &Answer) -> BTreeMap<String, u32> {
    criteria_scores(question, answer, &mut rand::thread_rng())
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
