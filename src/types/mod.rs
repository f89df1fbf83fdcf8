//! Core types shared across the crate.
//!
//! - **Errors**: Application error types with thiserror derives and HTTP mapping
//! - **Config**: Configuration structures for the listener, tools, and upstream API

mod config;
mod errors;

pub use config::{Config, ObservabilityConfig, ServerConfig, ToolsConfig, UpstreamConfig};
pub use errors::{Error, Result};
