/// LLM Client — the single point of entry for calls to the local inference server.
///
/// ARCHITECTURAL RULE: No other module may talk to the inference server directly.
/// All LLM interactions MUST go through this module.
///
/// The server speaks the Ollama HTTP API: `GET /api/tags` and `POST /api/generate`.
/// One round trip per call, no retries. Callers own the fallback.
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2:7b-chat";

/// Low temperature keeps evaluations close to deterministic.
const TEMPERATURE: f32 = 0.3;
const TOP_P: f32 = 0.9;
const NUM_PREDICT: u32 = 800;

/// How much of the prompt / response to echo into debug logs.
const LOG_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Client for the local inference server.
/// Cheap to clone; the selected model and last connection status are shared across clones.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: Arc<RwLock<String>>,
    connected: Arc<AtomicBool>,
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build configured HTTP client ({e}), using defaults");
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: Arc::new(RwLock::new(model.into())),
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health check against `GET /api/tags`. Records and returns whether the server answered 2xx.
    pub async fn check_connection(&self) -> bool {
        debug!("Checking inference server at {}", self.base_url);

        let connected = match self.client.get(self.url("/api/tags")).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Inference server reachable at {}", self.base_url);
                true
            }
            Ok(response) => {
                warn!("Inference server responded with status {}", response.status());
                false
            }
            Err(e) => {
                warn!("Inference server unavailable: {e}");
                false
            }
        };

        self.connected.store(connected, Ordering::Relaxed);
        connected
    }

    /// Lists model names installed on the server. Any failure yields an empty list.
    pub async fn available_models(&self) -> Vec<String> {
        match self.installed_models().await {
            Ok(models) => {
                debug!("Available models: {:?}", models);
                models
            }
            Err(e) => {
                warn!("Failed to list models: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`available_models`](Self::available_models), but keeps a failed listing
    /// distinguishable from an empty one.
    pub async fn installed_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self.client.get(self.url("/api/tags")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        let body = response.text().await?;
        let tags: TagsResponse = serde_json::from_str(&body)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Sends a single non-streaming generate request and returns the model's text.
    /// Uses the currently selected model unless `model` overrides it.
    pub async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<String, LlmError> {
        let model = match model {
            Some(m) => m.to_string(),
            None => self.current_model().await,
        };

        debug!(
            "Sending prompt to model {model}: {}...",
            preview(prompt, LOG_PREVIEW_CHARS)
        );

        let request_body = GenerateRequest {
            model: &model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                num_predict: NUM_PREDICT,
            },
        };

        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Generate call returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let generated: GenerateResponse = serde_json::from_str(&body)?;

        debug!(
            "Generate call succeeded (done={}): {}...",
            generated.done,
            preview(&generated.response, LOG_PREVIEW_CHARS)
        );

        Ok(generated.response)
    }

    /// Last result of `check_connection`. `false` until a check has run.
    pub fn connection_status(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub async fn current_model(&self) -> String {
        self.model.read().await.clone()
    }

    pub async fn set_model(&self, model: impl Into<String>) {
        let model = model.into();
        info!("Switching generate model to {model}");
        *self.model.write().await = model;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// True when `requested` names the installed model, treating a bare name as `name:latest`.
pub fn model_matches(installed: &str, requested: &str) -> bool {
    with_default_tag(installed) == with_default_tag(requested)
}

fn with_default_tag(name: &str) -> Cow<'_, str> {
    if name.contains(':') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}:latest"))
    }
}

/// Base URL of a local port that was just released, so connections to it are refused.
#[cfg(test)]
pub(crate) fn closed_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Pulls the JSON object out of free-form model output.
///
/// Strips markdown code fences first, then takes the span from the first `{`
/// to the last `}`. Returns `None` when no such span exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_json_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_object_from_prose() {
        let input = "Sure! Here is the evaluation:\n{\"score\": 80}\nHope this helps.";
        assert_eq!(extract_json_object(input), Some("{\"score\": 80}"));
    }

    #[test]
    fn test_extract_json_object_keeps_nested_braces() {
        let input = "```json\n{\"score\": 70, \"criteria_scores\": {\"Clarity\": 75}}\n```";
        assert_eq!(
            extract_json_object(input),
            Some("{\"score\": 70, \"criteria_scores\": {\"Clarity\": 75}}")
        );
    }

    #[test]
    fn test_extract_json_object_none_without_braces() {
        assert_eq!(extract_json_object("I cannot evaluate this answer."), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("situación", 8), "situació");
    }

    #[test]
    fn test_model_matches_implicit_latest_tag() {
        assert!(model_matches("mistral:latest", "mistral"));
        assert!(model_matches("mistral", "mistral:latest"));
        assert!(model_matches("mistral:7b", "mistral:7b"));
        assert!(!model_matches("mistral:7b", "mistral"));
        assert!(!model_matches("llama2:7b-chat", "mistral:7b"));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = LlmClient::new("http://localhost:11434/", DEFAULT_MODEL, Duration::from_secs(5));
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert!(!client.connection_status());
    }
}
