//! Tool executor: resolve, run, and shape every call into a [`ToolResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::tools::registry::{Tool, ToolArgs, ToolRegistry};
use crate::types::{Error, Result};

/// Uniform envelope returned by every tool execution.
///
/// `result` is populated on success and `error_message` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    #[serde(alias = "toolname")]
    pub tool_name: String,
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, alias = "errormessage")]
    pub error_message: Option<String>,
    #[serde(alias = "executedat")]
    pub executed_at: DateTime<Utc>,
}

impl ToolResult {
    pub fn success(tool_name: impl Into<String>, result: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            result: Some(result),
            error_message: None,
            executed_at: Utc::now(),
        }
    }

    pub fn failure(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            result: None,
            error_message: Some(message.into()),
            executed_at: Utc::now(),
        }
    }
}

/// Dispatches tool calls against a shared registry.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    simulated_latency: Duration,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, simulated_latency: Duration) -> Self {
        Self {
            registry,
            simulated_latency,
        }
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.registry.list()
    }

    /// Execute `name` with `args`.
    ///
    /// Unknown tools and handler failures come back as `success == false`
    /// results carrying the caller's spelling of `name`. The only `Err` is
    /// [`Error::Cancelled`], raised when `cancel` fires before the handler
    /// runs.
    pub async fn execute(
        &self,
        name: &str,
        args: &ToolArgs,
        cancel: &CancellationToken,
    ) -> Result<ToolResult> {
        tracing::info!(tool = name, "Executing tool");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(tool = name, "Tool execution cancelled");
                return Err(Error::cancelled(format!("execution of tool '{}' was cancelled", name)));
            }
            _ = tokio::time::sleep(self.simulated_latency) => {}
        }

        let result = match self.registry.resolve(name) {
            Some(entry) => match entry.kind.invoke(args) {
                Ok(value) => ToolResult::success(name, value),
                Err(message) => ToolResult::failure(name, message),
            },
            None => ToolResult::failure(name, format!("Tool '{}' not found", name)),
        };

        tracing::info!(tool = name, success = result.success, "Tool execution completed");
        Ok(result)
    }
}
