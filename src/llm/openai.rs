//! OpenAI Chat Completions client.

use std::env;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerateError;

use super::prompt::{SYSTEM_PROMPT, build_user_message, clean_response};
use super::{GenerationRequest, MessageGenerator};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable to point the client at a compatible endpoint.
pub const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";

/// Longest slice of an error body quoted back to the user.
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`MessageGenerator`] that calls `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiClient {
    /// Client for the base URL in `OPENAI_BASE_URL`, or the public API.
    pub fn new() -> Self {
        let base_url = match env::var(BASE_URL_ENV_VAR) {
            Ok(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL.to_string(),
        };
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MessageGenerator for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        if request.diff.trim().is_empty() {
            return Ok(String::new());
        }

        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_message(&request.diff, request.hint.as_deref()),
                },
            ],
            temperature: 1.0,
        };

        debug!(
            "Requesting commit message from {} (diff {} chars, hint: {})",
            request.model,
            request.diff.chars().count(),
            request.hint.is_some()
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenerateError::Request)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(GenerateError::Authentication);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerateError::Failed(describe_failure(status, &text)));
        }

        let parsed: ChatResponse = response.json().await.map_err(GenerateError::Request)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| clean_response(&c))
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }

        Ok(content)
    }
}

/// Human-readable summary of a non-success response.
fn describe_failure(status: StatusCode, body: &str) -> String {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
    };

    if detail.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {detail}")
    }
}
