//! Resource catalog: fixed metadata with lazily resolved content.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;

use crate::types::{Error, Result};

/// Body served for catalog entries without a content mapping.
pub const CONTENT_NOT_AVAILABLE: &str = "Content not available";

/// Addressable, read-only resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(alias = "mimetype")]
    pub mime_type: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Resolved body of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,
    pub content: String,
}

/// How a resource's body is produced at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Fixed text.
    Text(&'static str),
    /// Sample JSON document stamped with the resolution time.
    JsonSnapshot,
    /// Listed, but no body mapping.
    Unavailable,
}

impl ContentSource {
    fn resolve(&self) -> String {
        match self {
            ContentSource::Text(text) => (*text).to_string(),
            ContentSource::JsonSnapshot => json!({
                "sample": "data",
                "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true),
            })
            .to_string(),
            ContentSource::Unavailable => CONTENT_NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct ResourceEntry {
    resource: Resource,
    source: ContentSource,
}

/// Fixed, in-memory resource list. URIs match by exact string equality.
#[derive(Debug, Default)]
pub struct ResourceCatalog {
    entries: Vec<ResourceEntry>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Catalog holding `mcp://example/info` and `mcp://example/data`.
    pub fn builtin() -> Result<Self> {
        Self::with_resources([
            (
                Resource {
                    uri: "mcp://example/info".to_string(),
                    name: "Sample Information".to_string(),
                    description: "Basic information resource".to_string(),
                    mime_type: "text/plain".to_string(),
                    metadata: Map::new(),
                },
                ContentSource::Text("This is sample information from the MCP server."),
            ),
            (
                Resource {
                    uri: "mcp://example/data".to_string(),
                    name: "Sample Data".to_string(),
                    description: "JSON data resource".to_string(),
                    mime_type: "application/json".to_string(),
                    metadata: Map::new(),
                },
                ContentSource::JsonSnapshot,
            ),
        ])
    }

    /// Catalog holding `resources` in iteration order.
    pub fn with_resources(
        resources: impl IntoIterator<Item = (Resource, ContentSource)>,
    ) -> Result<Self> {
        let mut catalog = Self::new();
        for (resource, source) in resources {
            catalog.register(resource, source)?;
        }
        Ok(catalog)
    }

    /// Add an entry. URIs must be non-empty and unique.
    pub fn register(&mut self, resource: Resource, source: ContentSource) -> Result<()> {
        if resource.uri.trim().is_empty() {
            return Err(Error::validation("Resource URI cannot be empty"));
        }
        if self.get(&resource.uri).is_some() {
            return Err(Error::validation(format!(
                "Resource '{}' is already registered",
                resource.uri
            )));
        }
        self.entries.push(ResourceEntry { resource, source });
        Ok(())
    }

    pub fn list(&self) -> Vec<Resource> {
        self.entries.iter().map(|e| e.resource.clone()).collect()
    }

    pub fn get(&self, uri: &str) -> Option<&Resource> {
        self.entry(uri).map(|e| &e.resource)
    }

    /// Resolve the body of `uri`, or `NotFound` when it is not catalogued.
    pub async fn content(&self, uri: &str, cancel: &CancellationToken) -> Result<String> {
        if cancel.is_cancelled() {
            return Err(Error::cancelled(format!("content lookup for '{}' was cancelled", uri)));
        }
        let entry = self
            .entry(uri)
            .ok_or_else(|| Error::not_found(format!("Resource not found: {}", uri)))?;
        tracing::debug!(uri, "Resolving resource content");
        Ok(entry.source.resolve())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, uri: &str) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| e.resource.uri == uri)
    }
}
