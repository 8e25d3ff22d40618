//! Application startup and lifecycle management.

use crate::config::RelayConfig;
use crate::handlers::{generate_response, health_check, method_not_allowed};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::{PromptTemplate, TextProvider};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::cors::cors_middleware;
use service_core::middleware::tracing::{http_trace_layer, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Path the relay is served on, besides `/`.
pub const RELAY_PATH: &str = "/api/generateResponse";

/// Shared application state. Immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub prompt: PromptTemplate,
    pub text_provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn new(config: RelayConfig, text_provider: Arc<dyn TextProvider>) -> Self {
        Self {
            prompt: PromptTemplate::new(config.prompt_style),
            config: Arc::new(config),
            text_provider,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors_policy = Arc::new(state.config.cors.clone());
    let relay = post(generate_response).fallback(method_not_allowed);

    Router::new()
        .route("/", relay.clone())
        .route(RELAY_PATH, relay)
        .route("/health", get(health_check).fallback(method_not_allowed))
        .with_state(state)
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn_with_state(cors_policy, cors_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the Gemini provider.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(config.gemini.provider_config())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %config.gemini.model,
            prompt_style = %config.prompt_style,
            cors = ?config.cors,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application with any text provider.
    pub async fn build_with_provider(
        config: RelayConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Relay service listening on port {}", port);

        let router = build_router(AppState::new(config, text_provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
