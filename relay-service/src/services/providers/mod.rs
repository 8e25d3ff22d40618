//! Text generation provider abstraction.
//!
//! The relay only needs one capability from upstream: turn a prompt string
//! into (maybe) some text. Gemini is the production backend; the mock backs
//! the tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Generated text, `None` when upstream returned nothing usable.
    pub text: Option<String>,

    /// Prompt tokens, when reported.
    pub input_tokens: Option<i32>,

    /// Generated tokens, when reported.
    pub output_tokens: Option<i32>,
}

#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt upstream. Exactly one request, no retries.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Cheap local readiness check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
