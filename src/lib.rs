//! # MCP Gateway - tool and resource execution over HTTP
//!
//! Provides:
//! - A tool registry and executor that shapes every call into a uniform
//!   [`tools::ToolResult`] envelope
//! - A fixed resource catalog with lazily resolved content
//! - The backend HTTP API exposing both
//! - A backend-for-frontend gateway that checks an API key and relays the
//!   same routes to the backend
//!
//! ## Architecture
//!
//! ```text
//!   client ─→ gateway ──[X-API-Key]──→ ProxyClient ─→ backend API
//!             (ApiKeyGate)                              │
//!                                                       ▼
//!                                                  McpService
//!                                                  ├─ ToolExecutor ─→ ToolRegistry
//!                                                  └─ ResourceCatalog
//! ```
//!
//! Catalogs are built once at startup and shared read-only; no request
//! mutates shared state.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod gateway;
pub mod resources;
pub mod server;
pub mod service;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;
pub mod validation;

pub use service::McpService;
pub use types::{Config, Error, Result};
