//! OpenAI-compatible chat completions backend

use super::config::IntelligenceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Reasons a remote generation attempt produced no usable answer
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Upstream error: status {status}")]
    Upstream { status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response contained no content")]
    EmptyContent,

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

impl RemoteError {
    /// Short label used for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Initialization(_) => "initialization",
            Self::Timeout(_) => "timeout",
            Self::Request(_) => "request",
            Self::Upstream { .. } => "upstream",
            Self::InvalidResponse(_) => "invalid_response",
            Self::EmptyContent => "empty_content",
            Self::MissingField(_) => "missing_field",
        }
    }
}

/// A single system + user prompt exchange
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// Backend able to answer a chat-style completion request.
///
/// Implementations make exactly one attempt and return the trimmed,
/// non-empty message content.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        config: &IntelligenceConfig,
        request: CompletionRequest,
    ) -> Result<String, RemoteError>;
}

/// HTTP client for OpenAI-compatible `/chat/completions` endpoints
pub struct ChatCompletionClient {
    http: Client,
}

impl ChatCompletionClient {
    /// Create a new client; `timeout` applies when a call's config does not override it
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Initialization(e.to_string()))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionClient {
    async fn complete(
        &self,
        config: &IntelligenceConfig,
        request: CompletionRequest,
    ) -> Result<String, RemoteError> {
        let body = ChatCompletionRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(request.system),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(request.user),
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!("Calling chat completions: model={}, max_tokens={}", body.model, body.max_tokens);

        let response = self
            .http
            .post(&config.endpoint)
            .bearer_auth(&config.api_key)
            .timeout(config.timeout())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout(e.to_string())
                } else {
                    RemoteError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Upstream {
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(RemoteError::EmptyContent)
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
