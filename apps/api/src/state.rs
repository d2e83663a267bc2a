use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::evaluation::AnswerEvaluator;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable evaluator. Default: HeuristicEvaluator. Swap via ENABLE_LLM_EVALUATION.
    pub evaluator: Arc<dyn AnswerEvaluator>,
    /// In-memory knowledge base, shared with the LLM evaluator.
    pub knowledge: Arc<RwLock<KnowledgeBase>>,
}
