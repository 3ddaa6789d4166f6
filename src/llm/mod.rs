//! Commit message generation through a chat-completion model.

pub mod openai;
pub mod prompt;

use async_trait::async_trait;

use crate::error::GenerateError;

pub use openai::OpenAiClient;
pub use prompt::{SYSTEM_PROMPT, build_user_message, clean_response};

/// Everything one generation call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub diff: String,
    pub model: String,
    pub api_key: String,
    /// Extra guidance from the user, set after a regenerate-with-hint.
    pub hint: Option<String>,
}

/// Produces a commit message for a diff.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Generate a message. An empty or whitespace-only diff yields `""`.
    ///
    /// A rejected key must be reported as [`GenerateError::Authentication`] so
    /// the caller can tell the user to fix their credentials.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}
