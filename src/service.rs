//! Application service: the single entry point transports call into.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::resources::{Resource, ResourceCatalog, ResourceContent};
use crate::tools::{Tool, ToolArgs, ToolExecutor, ToolRegistry, ToolResult};
use crate::types::{Config, Result};
use crate::validation::validate_not_blank;

/// Thin facade over the tool executor and resource catalog.
///
/// Cheap to clone; both collaborators are shared read-only.
#[derive(Debug, Clone)]
pub struct McpService {
    executor: Arc<ToolExecutor>,
    resources: Arc<ResourceCatalog>,
}

impl McpService {
    pub fn new(executor: Arc<ToolExecutor>, resources: Arc<ResourceCatalog>) -> Self {
        Self {
            executor,
            resources,
        }
    }

    /// Built-in tools and resources, with tool latency from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let executor = ToolExecutor::new(
            Arc::new(ToolRegistry::builtin()?),
            config.tools.simulated_latency,
        );
        Ok(Self::new(
            Arc::new(executor),
            Arc::new(ResourceCatalog::builtin()?),
        ))
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.executor.tools()
    }

    /// Execute a tool. Absent arguments mean an empty argument map.
    pub async fn execute_tool(
        &self,
        name: &str,
        args: Option<ToolArgs>,
        cancel: &CancellationToken,
    ) -> Result<ToolResult> {
        validate_not_blank(name, "Tool name is required")?;
        let args = args.unwrap_or_default();
        self.executor.execute(name, &args, cancel).await
    }

    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources.list()
    }

    pub async fn resource_content(
        &self,
        uri: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceContent> {
        validate_not_blank(uri, "URI is required")?;
        let content = self.resources.content(uri, cancel).await?;
        Ok(ResourceContent {
            uri: uri.to_string(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Error;
    use std::time::Duration;

    fn service() -> McpService {
        let mut config = Config::default();
        config.tools.simulated_latency = Duration::ZERO;
        McpService::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_blank_tool_name_rejected() {
        let err = service()
            .execute_tool("   ", None, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.message(), "Tool name is required");
    }

    #[tokio::test]
    async fn test_missing_args_default_to_empty() {
        let result = service()
            .execute_tool("echo", None, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.result.unwrap()["message"], "Hello, World!");
    }

    #[tokio::test]
    async fn test_blank_uri_rejected() {
        let err = service()
            .resource_content("", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "URI is required");
    }

    #[tokio::test]
    async fn test_resource_content_echoes_uri() {
        let content = service()
            .resource_content("mcp://example/info", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(content.uri, "mcp://example/info");
        assert!(!content.content.is_empty());
    }

    #[test]
    fn test_listings() {
        let svc = service();
        assert_eq!(svc.list_tools().len(), 3);
        assert_eq!(svc.list_resources().len(), 2);
    }
}
