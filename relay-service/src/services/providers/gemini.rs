//! Gemini `generateContent` provider.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Unset means the request waits as long as upstream takes.
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout: None,
        }
    }
}

pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        tracing::info!(model = %self.config.model, raw_response = %body, "Gemini raw response");

        let api_response: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let usage = api_response.usage_metadata.clone().unwrap_or_default();

        Ok(ProviderResponse {
            text: api_response.first_text(),
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.expose_secret().trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Only the fields the relay reads. Every level tolerates absence or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    fn first_text(&self) -> Option<String> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .clone()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn extracts_first_text_part() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello"},{"text":"ignored"}],"role":"model"},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(response.first_text().as_deref(), Some("Hello"));
    }

    #[test]
    fn empty_document_has_no_text() {
        assert_eq!(parse("{}").first_text(), None);
    }

    #[test]
    fn missing_levels_have_no_text() {
        assert_eq!(parse(r#"{"candidates":[]}"#).first_text(), None);
        assert_eq!(parse(r#"{"candidates":null}"#).first_text(), None);
        assert_eq!(parse(r#"{"candidates":[{}]}"#).first_text(), None);
        assert_eq!(parse(r#"{"candidates":[{"content":{}}]}"#).first_text(), None);
        assert_eq!(
            parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#).first_text(),
            None
        );
        assert_eq!(
            parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":""}}]}}]}"#)
                .first_text(),
            None
        );
    }

    #[test]
    fn reads_usage_metadata() {
        let response = parse(
            r#"{"candidates":[],"usageMetadata":{"promptTokenCount":12,"candidatesTokenCount":3,"totalTokenCount":15}}"#,
        );
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, Some(12));
        assert_eq!(usage.candidates_token_count, Some(3));
    }

    #[test]
    fn request_body_nests_prompt_text() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "system: hi".to_string(),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "contents": [{ "parts": [{ "text": "system: hi" }] }] })
        );
    }

    #[test]
    fn api_url_joins_base_and_model() {
        let mut config = GeminiConfig::new("key");
        config.base_url = "http://localhost:9999/v1beta/".to_string();
        let provider = GeminiTextProvider::new(config).unwrap();
        assert_eq!(
            provider.api_url(),
            "http://localhost:9999/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn health_check_requires_api_key() {
        let provider = GeminiTextProvider::new(GeminiConfig::new("  ")).unwrap();
        assert!(matches!(
            provider.health_check().await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}
