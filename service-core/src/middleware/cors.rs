//! CORS handling for browser callers.
//!
//! Headers are written on every response, including errors and preflight
//! replies. Any `OPTIONS` request is answered here with an empty `200` and
//! never reaches the router.
//!
//! `tower_http::cors::CorsLayer` is not used because it only sends the
//! allow-methods/allow-headers pair on preflight responses.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

pub const ALLOWED_HEADERS: &str = "Content-Type, Accept, X-CSRF-Token, X-Requested-With";

/// Local development origins accepted by the allow-list policy by default.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://127.0.0.1:5503",
    "https://127.0.0.1:5503",
    "http://localhost:5503",
];

/// Which origins may read responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// `Access-Control-Allow-Origin: *` on every response.
    #[default]
    Wildcard,
    /// Echo the request `Origin` only when it is listed.
    AllowList(Vec<String>),
}

impl CorsPolicy {
    pub fn default_allow_list() -> Self {
        CorsPolicy::AllowList(
            DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        )
    }

    /// Value for `Access-Control-Allow-Origin`, if any, for a request origin.
    pub fn allow_origin(&self, origin: Option<&str>) -> Option<HeaderValue> {
        match self {
            CorsPolicy::Wildcard => Some(HeaderValue::from_static("*")),
            CorsPolicy::AllowList(allowed) => origin
                .filter(|o| allowed.iter().any(|a| a == o))
                .and_then(|o| HeaderValue::from_str(o).ok()),
        }
    }

    fn varies_by_origin(&self) -> bool {
        matches!(self, CorsPolicy::AllowList(_))
    }
}

pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let mut response = if *req.method() == Method::OPTIONS {
        tracing::debug!(origin = ?origin, "Answering CORS preflight");
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();

    if let Some(allow_origin) = policy.allow_origin(origin.as_deref()) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    } else if let Some(origin) = &origin {
        tracing::warn!(origin = %origin, "Origin not in CORS allow-list");
    }
    if policy.varies_by_origin() {
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );

    response
}
