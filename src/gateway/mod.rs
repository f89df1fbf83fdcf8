//! Backend-for-frontend gateway.
//!
//! Authenticates callers with a shared API key ([`ApiKeyGate`]) and relays the
//! `/api/mcp` surface to the upstream API ([`ProxyClient`]). Upstream failures
//! of any kind collapse into a generic 500 problem response; the cause is only
//! logged.

pub mod assets;
pub mod auth;
pub mod proxy;
pub mod routes;

pub use auth::{require_api_key, unauthorized_response, ApiKeyGate, AuthRejection, API_KEY_HEADER};
pub use proxy::ProxyClient;
pub use routes::gateway_router;
