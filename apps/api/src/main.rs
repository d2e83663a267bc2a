mod config;
mod errors;
mod evaluation;
mod knowledge;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::heuristic::HeuristicEvaluator;
use crate::evaluation::llm::LlmEvaluator;
use crate::evaluation::AnswerEvaluator;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.ollama_base_url.clone(),
        config.ollama_model.clone(),
        Duration::from_secs(config.ollama_timeout_secs),
    );
    info!(
        "LLM client initialized ({} model: {})",
        llm.base_url(),
        config.ollama_model
    );

    let knowledge = Arc::new(RwLock::new(KnowledgeBase::default()));

    // Initialize evaluator (HeuristicEvaluator by default, swap via ENABLE_LLM_EVALUATION)
    let evaluator: Arc<dyn AnswerEvaluator> = if config.enable_llm_evaluation {
        llm.check_connection().await;
        info!(
            "Evaluator: llm (inference server connected: {})",
            llm.connection_status()
        );
        Arc::new(LlmEvaluator::new(llm.clone(), knowledge.clone()))
    } else {
        info!("Evaluator: heuristic");
        Arc::new(HeuristicEvaluator)
    };

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        evaluator,
        knowledge,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
