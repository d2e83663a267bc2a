// Answer evaluation.
// Two interchangeable engines behind one trait: the rule-based heuristic scorer
// and the LLM evaluator, which falls back to the heuristic scorer on any failure.
// All LLM calls go through llm_client.

pub mod feedback;
pub mod handlers;
pub mod heuristic;
pub mod llm;
pub mod prompts;
pub mod tips;

use async_trait::async_trait;

use crate::models::evaluation::EvaluationResult;
use crate::models::question::{Answer, Question};

/// The evaluator trait. Implement this to swap engines without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn AnswerEvaluator>`. Infallible: every
/// engine must produce a result, falling back internally when it cannot.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(&self, question: &Question, answer: &Answer) -> EvaluationResult;
}
