//! External text generator: trait seam plus the local Ollama client.
//!
//! Every assistant-facing sentence goes through a `TextGenerator`. The
//! Ollama implementation calls the chat API (`/api/chat`) without
//! streaming. Failures are reported once as `GenerationUnavailable`;
//! there is no retry at this layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bistro_protocol::ChatMessage;

use crate::error::{AssistantError, AssistantResult};

/// Stateless text completion: ordered role-tagged messages in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> AssistantResult<String>;

    /// Same as `generate`, hinting the backend that a JSON object is
    /// expected. Callers must still tolerate non-JSON output.
    async fn generate_json(&self, messages: &[ChatMessage]) -> AssistantResult<String> {
        self.generate(messages).await
    }
}

/// Configuration for the Ollama endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    /// Ollama HTTP API base URL.
    #[serde(default = "default_host")]
    pub host: String,
    /// Model to use for generation.
    #[serde(default = "default_model")]
    pub model: String,
    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "llama3".into()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Ollama chat API request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    stream: bool,
}

/// Ollama chat API response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for a local Ollama server.
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> AssistantResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AssistantError::GenerationUnavailable(format!("failed to build http client: {e}"))
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    async fn chat(&self, messages: &[ChatMessage], format: Option<&str>) -> AssistantResult<String> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            format,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "ollama request failed");
                AssistantError::GenerationUnavailable(format!("ollama request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "ollama returned non-200");
            return Err(AssistantError::GenerationUnavailable(format!(
                "ollama returned {status}"
            )));
        }

        let chat_resp: ChatResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to parse ollama response body");
            AssistantError::GenerationUnavailable(format!("invalid ollama response: {e}"))
        })?;

        chat_resp.message.map(|m| m.content).ok_or_else(|| {
            AssistantError::GenerationUnavailable("ollama response has no message".into())
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, messages: &[ChatMessage]) -> AssistantResult<String> {
        self.chat(messages, None).await
    }

    async fn generate_json(&self, messages: &[ChatMessage]) -> AssistantResult<String> {
        self.chat(messages, Some("json")).await
    }
}
