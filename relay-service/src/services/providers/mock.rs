//! Mock provider for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum MockReply {
    Text(Option<String>),
    ApiError(String),
    NetworkError(String),
}

/// Returns a canned reply and remembers every prompt it was given.
pub struct MockTextProvider {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Upstream answered with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(Some(text.into())))
    }

    /// Upstream answered, but without a text part.
    pub fn empty() -> Self {
        Self::with_reply(MockReply::Text(None))
    }

    /// Upstream returned a non-success status.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::ApiError(message.into()))
    }

    /// Upstream could not be reached.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::NetworkError(message.into()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: i32::try_from(prompt.len() / 4).ok(),
                output_tokens: text
                    .as_ref()
                    .and_then(|t| i32::try_from(t.len() / 4).ok()),
            }),
            MockReply::ApiError(message) => Err(ProviderError::ApiError(message.clone())),
            MockReply::NetworkError(message) => {
                Err(ProviderError::NetworkError(message.clone()))
            }
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
