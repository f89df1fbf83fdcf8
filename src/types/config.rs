//! Configuration structures.
//!
//! Configuration is loaded from an optional JSON file and then overridden by
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::{Error, Result};
use crate::validation::validate_not_blank;

/// Global server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Tool execution configuration.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Upstream API used in gateway mode.
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (host:port).
    pub listen_addr: String,

    /// Maximum requests handled concurrently. Further requests wait for a
    /// slot (backpressure via tower's concurrency limit).
    pub max_in_flight_requests: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_in_flight_requests: 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Tool execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Artificial delay before each tool runs.
    #[serde(with = "humantime_serde")]
    pub simulated_latency: Duration,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(100),
        }
    }
}

/// Upstream API configuration (gateway mode).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every proxied path is resolved against.
    pub base_url: String,

    /// Shared secret sent as `X-API-Key` upstream and required from callers.
    pub api_key: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8081".to_string(),
            api_key: String::new(),
        }
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration: defaults, then the JSON file (if any), then
    /// process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str(&raw).map_err(|e| {
                    Error::config(format!("invalid config file {}: {}", path.display(), e))
                })?
            }
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `MCP_*` overrides from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("MCP_LISTEN_ADDR") {
            self.server.listen_addr = addr;
        }
        if let Some(raw) = lookup("MCP_MAX_IN_FLIGHT") {
            self.server.max_in_flight_requests = raw.trim().parse().map_err(|_| {
                Error::config(format!("MCP_MAX_IN_FLIGHT must be a positive integer, got '{}'", raw))
            })?;
        }
        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("MCP_LOG_FORMAT") {
            self.observability.json_logs = format.eq_ignore_ascii_case("json");
        }
        if let Some(raw) = lookup("MCP_TOOL_LATENCY") {
            self.tools.simulated_latency = humantime_serde::re::humantime::parse_duration(raw.trim())
                .map_err(|e| Error::config(format!("MCP_TOOL_LATENCY '{}': {}", raw, e)))?;
        }
        if let Some(url) = lookup("MCP_API_BASE_URL") {
            self.upstream.base_url = url;
        }
        if let Some(key) = lookup("MCP_API_KEY") {
            self.upstream.api_key = key;
        }
        if self.server.max_in_flight_requests == 0 {
            return Err(Error::config("max_in_flight_requests must be positive"));
        }
        Ok(())
    }

    /// Check the settings gateway mode cannot run without.
    pub fn validate_gateway(&self) -> Result<()> {
        validate_not_blank(&self.upstream.api_key, "upstream API key is required")
            .map_err(|e| Error::config(e.message()))?;
        let url = reqwest::Url::parse(&self.upstream.base_url).map_err(|e| {
            Error::config(format!("invalid upstream base URL '{}': {}", self.upstream.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "upstream base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.tools.simulated_latency, Duration::from_millis(100));
        assert_eq!(config.observability.log_level, "info");
        assert!(config.upstream.api_key.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("MCP_LISTEN_ADDR", "0.0.0.0:9000"),
                ("MCP_LOG_FORMAT", "JSON"),
                ("MCP_TOOL_LATENCY", "250ms"),
                ("MCP_API_BASE_URL", "http://api.internal:5000"),
                ("MCP_API_KEY", "dev-api-key-123"),
            ]))
            .unwrap();

        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert!(config.observability.json_logs);
        assert_eq!(config.tools.simulated_latency, Duration::from_millis(250));
        assert_eq!(config.upstream.base_url, "http://api.internal:5000");
        assert_eq!(config.upstream.api_key, "dev-api-key-123");
    }

    #[test]
    fn test_bad_latency_is_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[("MCP_TOOL_LATENCY", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_in_flight_rejected() {
        let mut config = Config::default();
        assert!(config.apply_env(env(&[("MCP_MAX_IN_FLIGHT", "0")])).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server": {{"listen_addr": "127.0.0.1:7000"}}, "tools": {{"simulated_latency": "5ms"}}}}"#
        )
        .unwrap();

        let mut config: Config =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        config.apply_env(env(&[])).unwrap();

        assert_eq!(config.server.listen_addr, "127.0.0.1:7000");
        assert_eq!(config.server.max_in_flight_requests, 1024);
        assert_eq!(config.tools.simulated_latency, Duration::from_millis(5));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_gateway() {
        let mut config = Config::default();
        assert!(config.validate_gateway().is_err());

        config.upstream.api_key = "secret".to_string();
        assert!(config.validate_gateway().is_ok());

        config.upstream.base_url = "ftp://example.com".to_string();
        assert!(config.validate_gateway().is_err());

        config.upstream.base_url = "not a url".to_string();
        assert!(config.validate_gateway().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut upstream = UpstreamConfig::default();
        upstream.api_key = "super-secret".to_string();
        let rendered = format!("{:?}", upstream);
        assert!(!rendered.contains("super-secret"));
    }
}
