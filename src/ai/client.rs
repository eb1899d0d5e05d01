use crate::types::Turn;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed assistant response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("assistant did not answer within {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Config(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

// ============================================
// Collaborator Contract
// ============================================

/// A remote generative-language service.
///
/// An empty string is a valid answer; callers decide what to show for it.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Single-turn generation with no history.
    async fn generate_text(&self, prompt: &str) -> ChatResult<String>;

    /// Multi-turn generation: `history` is the ordered conversation so far and
    /// `message` the new user input it should answer.
    async fn converse(
        &self,
        system_instruction: &str,
        history: &[Turn],
        message: &str,
    ) -> ChatResult<String>;
}

#[async_trait]
impl<T: AssistantClient + ?Sized> AssistantClient for Arc<T> {
    async fn generate_text(&self, prompt: &str) -> ChatResult<String> {
        (**self).generate_text(prompt).await
    }

    async fn converse(
        &self,
        system_instruction: &str,
        history: &[Turn],
        message: &str,
    ) -> ChatResult<String> {
        (**self).converse(system_instruction, history, message).await
    }
}
