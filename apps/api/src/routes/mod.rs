pub mod health;
pub mod llm;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::evaluation::handlers as evaluation;
use crate::knowledge::handlers as knowledge;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation API
        .route("/api/v1/evaluations", post(evaluation::handle_evaluate))
        .route(
            "/api/v1/evaluations/heuristic",
            post(evaluation::handle_evaluate_heuristic),
        )
        .route("/api/v1/tips", post(evaluation::handle_tips))
        // Inference server
        .route("/api/v1/llm/status", get(llm::handle_status))
        .route("/api/v1/llm/models", get(llm::handle_models))
        .route("/api/v1/llm/model", put(llm::handle_set_model))
        // Knowledge base
        .route("/api/v1/knowledge", post(knowledge::handle_add_knowledge))
        .route(
            "/api/v1/knowledge/context",
            get(knowledge::handle_get_context),
        )
        .route("/api/v1/knowledge/stats", get(knowledge::handle_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::evaluation::heuristic::HeuristicEvaluator;
    use crate::knowledge::KnowledgeBase;
    use crate::llm_client::{closed_local_url, LlmClient};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state() -> AppState {
        state_with_server(&closed_local_url())
    }

    fn state_with_server(base_url: &str) -> AppState {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            ollama_base_url: base_url.to_string(),
            ollama_model: "llama2:7b-chat".to_string(),
            ollama_timeout_secs: 2,
            enable_llm_evaluation: false,
        };
        let llm = LlmClient::new(
            config.ollama_base_url.clone(),
            config.ollama_model.clone(),
            Duration::from_secs(config.ollama_timeout_secs),
        );
        AppState {
            llm,
            config,
            evaluator: Arc::new(HeuristicEvaluator),
            knowledge: Arc::new(RwLock::new(KnowledgeBase::default())),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn evaluate_body(answer: &str) -> Value {
        json!({
            "question": {
                "category": "behavioral",
                "title": "Tell me about a conflict",
                "time_limit_minutes": 5,
                "evaluation_criteria": ["Conflict resolution", "Communication"]
            },
            "answer": {"text": answer, "time_spent_secs": 200}
        })
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_evaluate_returns_bounded_result() {
        let request = json_request(
            "POST",
            "/api/v1/evaluations",
            evaluate_body("The situation was a conflict over scope; my task was to mediate"),
        );
        let (status, body) = send(build_router(test_state()), request).await;

        assert_eq!(status, StatusCode::OK);
        let score = body["score"].as_u64().unwrap();
        assert!(score <= 100);
        assert_eq!(body["engine"], "heuristic");
        assert_eq!(body["criteria_scores"].as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_evaluate_short_answer_scores_low() {
        let request = json_request(
            "POST",
            "/api/v1/evaluations/heuristic",
            evaluate_body("I don't know"),
        );
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["score"].as_u64().unwrap() <= 25);
    }

    #[tokio::test]
    async fn test_evaluate_rejects_empty_answer() {
        let request = json_request("POST", "/api/v1/evaluations", evaluate_body("   "));
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_tips() {
        let request = json_request(
            "POST",
            "/api/v1/tips",
            json!({"stats": {"average_score": 50.0, "average_time_secs": 700.0}}),
        );
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tips"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_knowledge_add_then_stats() {
        let state = test_state();

        let request = json_request(
            "POST",
            "/api/v1/knowledge",
            json!({"category": "system-design", "information": "Estimate load before choosing storage"}),
        );
        let (status, _) = send(build_router(state.clone()), request).await;
        assert_eq!(status, StatusCode::CREATED);

        let request = Request::get("/api/v1/knowledge/stats")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(build_router(state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["system-design"], 1);
        assert_eq!(body["technical"], 6);
    }

    #[tokio::test]
    async fn test_knowledge_context_query() {
        let request = Request::get("/api/v1/knowledge/context?category=technical&title=REST%20APIs")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["relevant_info"].as_str().unwrap().contains("RESTful"));
        assert!((body["confidence"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_llm_status_when_server_down() {
        let request = Request::get("/api/v1/llm/status").body(Body::empty()).unwrap();
        let (status, body) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], false);
        assert_eq!(body["model"], "llama2:7b-chat");
    }

    #[tokio::test]
    async fn test_set_model_offline_is_accepted() {
        let state = test_state();
        let request = json_request("PUT", "/api/v1/llm/model", json!({"model": "mistral:7b"}));
        let (status, body) = send(build_router(state.clone()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"], "mistral:7b");
        assert_eq!(state.llm.current_model().await, "mistral:7b");
    }

    #[tokio::test]
    async fn test_set_model_rejects_blank() {
        let request = json_request("PUT", "/api/v1/llm/model", json!({"model": "  "}));
        let (status, _) = send(build_router(test_state()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    async fn server_with_tags(tags: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(tags)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_set_model_bare_name_matches_latest_tag() {
        let mock_server = server_with_tags(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "mistral:latest"}]
        })))
        .await;
        let state = state_with_server(&mock_server.uri());

        let request = json_request("PUT", "/api/v1/llm/model", json!({"model": "mistral"}));
        let (status, body) = send(build_router(state.clone()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], true);
        assert_eq!(state.llm.current_model().await, "mistral");
    }

    #[tokio::test]
    async fn test_set_model_rejects_model_not_listed() {
        let mock_server = server_with_tags(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "mistral:latest"}]
        })))
        .await;
        let state = state_with_server(&mock_server.uri());

        let request = json_request("PUT", "/api/v1/llm/model", json!({"model": "mistral:7b"}));
        let (status, body) = send(build_router(state.clone()), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(state.llm.current_model().await, "llama2:7b-chat");
    }

    #[tokio::test]
    async fn test_set_model_accepted_when_listing_unusable() {
        let mock_server =
            server_with_tags(ResponseTemplate::new(200).set_body_string("not json")).await;
        let state = state_with_server(&mock_server.uri());

        let request = json_request("PUT", "/api/v1/llm/model", json!({"model": "phi3"}));
        let (status, body) = send(build_router(state.clone()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"], "phi3");
        assert_eq!(state.llm.current_model().await, "phi3");
    }
}
