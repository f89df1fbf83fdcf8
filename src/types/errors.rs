//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context. Each variant maps onto exactly one HTTP
//! status so transport code never has to guess.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::Problem;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the MCP server and gateway.
#[derive(Error, Debug)]
pub enum Error {
    /// Blank or missing required input (map to 400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown resource (map to 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or incorrect credential (map to 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller's cancellation signal fired (map to 499).
    #[error("operation cancelled: {0}")]
    Cancelled(String),

    /// Upstream API produced no usable result (map to 500). The message is
    /// the route-specific problem detail; the cause was logged by the proxy.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Invalid configuration detected at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-standard status used for requests abandoned by the client.
const CLIENT_CLOSED_REQUEST: u16 = 499;

impl Error {
    /// Convert to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Cancelled(_) => StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Error::Upstream(_)
            | Error::Config(_)
            | Error::Serialization(_)
            | Error::Http(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message, without the taxonomy prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Validation(msg)
            | Error::NotFound(msg)
            | Error::Unauthorized(msg)
            | Error::Cancelled(msg)
            | Error::Upstream(msg)
            | Error::Config(msg) => msg.clone(),
            Error::Serialization(e) => e.to_string(),
            Error::Http(e) => e.to_string(),
            Error::Io(e) => e.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

// 4xx carry their message as plain text; 5xx never leak the cause.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Error::Validation(msg) | Error::NotFound(msg) | Error::Cancelled(msg) => {
                (status, msg).into_response()
            }
            Error::Unauthorized(msg) => crate::gateway::unauthorized_response(&msg),
            Error::Upstream(detail) => Problem::internal(detail).into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                Problem::internal("An unexpected error occurred").into_response()
            }
        }
    }
}
