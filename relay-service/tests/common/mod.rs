//! Shared setup for relay-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use relay_service::config::{Environment, GeminiSettings, RelayConfig};
use relay_service::services::providers::gemini::{DEFAULT_MODEL, GEMINI_API_BASE};
use relay_service::services::{PromptStyle, TextProvider};
use relay_service::startup::build_router;
use relay_service::AppState;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use service_core::middleware::cors::CorsPolicy;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

pub fn test_config(cors: CorsPolicy) -> RelayConfig {
    RelayConfig {
        common: CoreConfig { port: 0 },
        environment: Environment::Test,
        service_name: "relay-service".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        gemini: GeminiSettings {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout_secs: None,
        },
        prompt_style: PromptStyle::Rich,
        cors,
    }
}

pub fn router_with(provider: Arc<dyn TextProvider>, cors: CorsPolicy) -> Router {
    build_router(AppState::new(test_config(cors), provider))
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.expect("router call failed")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub fn chat_body(message: &str, voice: bool) -> serde_json::Value {
    serde_json::json!({
        "message": message,
        "chatHistory": [
            { "role": "user", "content": "Hi there" },
            { "role": "assistant", "content": "Hello! How can I help?" }
        ],
        "isVoiceMode": voice
    })
}
