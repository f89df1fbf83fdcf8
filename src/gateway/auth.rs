//! API-key gate in front of the gateway's `/api/mcp` surface.
//!
//! Each request is either let through untouched or must carry an
//! `X-API-Key` header equal, byte for byte, to the configured secret.
//! Everything outside `/api/mcp` (health, docs, SPA pages and assets) is open.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use std::sync::Arc;

use crate::types::Error;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Paths that never require a key.
const OPEN_PREFIXES: [&str; 7] = [
    "/health",
    "/health/ready",
    "/swagger",
    "/api/assets",
    "/static/",
    "/manifest.json",
    "/favicon.ico",
];

/// The only surface the gate protects.
const PROTECTED_PREFIX: &str = "/api/mcp";

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingKey,
    InvalidKey,
}

impl AuthRejection {
    pub fn message(self) -> &'static str {
        match self {
            AuthRejection::MissingKey => "API key is required",
            AuthRejection::InvalidKey => "Invalid API key",
        }
    }
}

/// Shared-secret comparator plus path classifier.
#[derive(Clone)]
pub struct ApiKeyGate {
    api_key: Arc<str>,
}

impl fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ApiKeyGate {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// True when `path` bypasses authentication.
    pub fn should_skip(path: &str) -> bool {
        if OPEN_PREFIXES
            .iter()
            .any(|prefix| starts_with_segments(path, prefix))
        {
            return true;
        }
        !starts_with_segments(path, PROTECTED_PREFIX)
    }

    /// Check the `X-API-Key` header. An empty value counts as invalid.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthRejection> {
        let Some(provided) = headers.get(API_KEY_HEADER) else {
            return Err(AuthRejection::MissingKey);
        };
        let provided = provided.as_bytes();
        if provided.is_empty() || provided != self.api_key.as_bytes() {
            return Err(AuthRejection::InvalidKey);
        }
        Ok(())
    }
}

/// ASCII-case-insensitive prefix match on whole path segments: `/health`
/// covers `/health` and `/health/x` but not `/healthz`. A trailing `/` on the
/// prefix is ignored.
fn starts_with_segments(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    let Some(head) = path.get(..prefix.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(prefix) {
        return false;
    }
    let rest = &path[prefix.len()..];
    rest.is_empty() || rest.starts_with('/')
}

/// `401 {error, message}` body.
pub fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized", "message": message })),
    )
        .into_response()
}

/// Middleware enforcing the gate. Authorized requests are forwarded unchanged.
pub async fn require_api_key(
    State(gate): State<ApiKeyGate>,
    request: Request,
    next: Next,
) -> Response {
    if ApiKeyGate::should_skip(request.uri().path()) {
        return next.run(request).await;
    }

    match gate.authorize(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            let path = request.uri().path();
            match rejection {
                AuthRejection::MissingKey => {
                    tracing::warn!(path, "API key missing for request")
                }
                AuthRejection::InvalidKey => {
                    tracing::warn!(path, "Invalid API key for request")
                }
            }
            Error::unauthorized(rejection.message()).into_response()
        }
    }
}
