use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::LlmConfig;

const TEMPERATURE: f64 = 0.3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion client is not configured: {0}")]
    NotConfigured(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider answered {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("provider error {code}: {message}")]
    Provider { code: String, message: String },
    #[error("provider returned no content")]
    EmptyContent,
    #[error("unreadable provider response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Anything that can turn a conversation into a reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
    code: Option<serde_json::Value>,
}

/// OpenAI-compatible chat completions over HTTP.
pub struct HttpCompletionClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpCompletionClient {
    pub fn new(config: &LlmConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::NotConfigured("LLM_API_KEY is empty".to_string()));
        }

        let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" }
        })
    }
}

/// Pulls the reply text out of a completions body.
fn extract_content(body: CompletionResponse) -> Result<String, CompletionError> {
    if let Some(error) = body.error {
        let code = match error.code {
            Some(serde_json::Value::String(code)) => code,
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        };
        return Err(CompletionError::Provider {
            code,
            message: error.message.unwrap_or_default(),
        });
    }

    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyContent)
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let detail = response_text.chars().take(300).collect();
            return Err(CompletionError::Status { status, detail });
        }

        let body: CompletionResponse = serde_json::from_str(&response_text)?;
        extract_content(body)
    }
}
