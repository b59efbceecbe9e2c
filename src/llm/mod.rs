//! Text-generation transport

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::{GeminiClient, GeminiClientConfig};

/// One completion request: a system instruction plus one user message
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
}

/// A text-completion backend
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("missing API key for the text-generation service")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}
