use crate::error::RelayError;
use crate::models::{RelayRequest, RelayResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    Json,
};
use service_core::error::AppError;

/// Returned as `text` when upstream answered without a text part.
pub const NO_TEXT_PLACEHOLDER: &str = "Sorry, no text returned.";

/// Render the chat turn into a prompt, relay it upstream, return the text.
pub async fn generate_response(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Json<RelayResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| RelayError::MalformedBody(e.body_text()))?;

    let prompt = state.prompt.render(&request);

    tracing::info!(
        history_len = request.chat_history.len(),
        voice_mode = request.is_voice_mode,
        prompt_style = %state.prompt.style(),
        prompt_len = prompt.len(),
        "Relaying chat turn"
    );

    let response = state.text_provider.generate(&prompt).await?;

    tracing::debug!(
        input_tokens = ?response.input_tokens,
        output_tokens = ?response.output_tokens,
        "Upstream generation finished"
    );

    let text = response.text.unwrap_or_else(|| {
        tracing::warn!("Upstream response had no text part");
        NO_TEXT_PLACEHOLDER.to_string()
    });

    Ok(Json(RelayResponse { text }))
}

/// Anything other than `POST` (preflight never gets this far).
pub async fn method_not_allowed(method: Method) -> AppError {
    tracing::warn!(method = %method, "Rejected request method");
    AppError::MethodNotAllowed
}
