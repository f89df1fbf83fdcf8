//! Process-wide log output for both deployment modes.
//!
//! Level selection: a non-empty, parseable `RUST_LOG` directive set overrides
//! everything; otherwise `observability.log_level` (or `MCP_LOG_LEVEL`) is
//! used, falling back to `info` when that does not parse. Format is one
//! compact line per event, or one JSON object per event when
//! `MCP_LOG_FORMAT=json`.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Later calls are no-ops, as is the first
/// call when another subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let env_filter = level_filter(rust_log.as_deref(), &config.log_level);

        let result = if config.json_logs {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

fn level_filter(rust_log: Option<&str>, configured: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::{init_tracing, level_filter};
    use crate::types::ObservabilityConfig;

    #[test]
    fn init_tracing_is_idempotent() {
        let config = ObservabilityConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        assert_eq!(level_filter(Some("debug"), "warn").to_string(), "debug");
        assert_eq!(level_filter(None, "warn").to_string(), "warn");
        assert_eq!(level_filter(Some("  "), "error").to_string(), "error");
    }
}
