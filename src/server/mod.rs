//! HTTP transport for the backend API, plus pieces the gateway reuses.
//!
//! - [`api_router`]: the four `/api/mcp/*` routes over [`McpService`]
//! - [`HttpServer`]: listener loop with graceful shutdown
//! - [`Problem`]: RFC 7807 body for 5xx responses

pub mod listener;
pub mod problem;
pub mod routes;

pub use listener::HttpServer;
pub use problem::Problem;
pub use routes::{api_router, health_routes};

use serde_json::Value;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::tools::ToolArgs;
use crate::types::{Error, Result};

/// Token for one request's work. Cancelled when the guard drops, which
/// happens when the handler future completes or is dropped on disconnect.
pub fn request_cancellation() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// Decode an execute-tool request body.
///
/// Empty body and JSON `null` mean "no arguments"; anything other than a
/// JSON object is rejected.
pub fn parse_tool_args(body: &[u8]) -> Result<Option<ToolArgs>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::validation(format!("Invalid request body: {}", e)))?;
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(Error::validation("Request body must be a JSON object")),
    }
}
