//! Failures of the relay endpoint.
//!
//! Every cause collapses into the same 500 payload; the detail only goes to
//! the logs.

use crate::models::RelayErrorBody;
use crate::services::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const FAILURE_ERROR: &str = "Failed to generate response";

pub const FAILURE_TEXT: &str = "Sorry, I encountered an error while processing your request.";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Upstream failure: {0}")]
    Upstream(#[from] ProviderError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error generating response");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RelayErrorBody {
                error: FAILURE_ERROR.to_string(),
                text: FAILURE_TEXT.to_string(),
            }),
        )
            .into_response()
    }
}
