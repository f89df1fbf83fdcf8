//! Tool registry: metadata plus the handler each name dispatches to.
//!
//! Built once at startup and shared read-only. Lookup is case-insensitive;
//! listing preserves registration order.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::tools::calculator;
use crate::types::{Error, Result};

/// Arguments passed to a tool call.
pub type ToolArgs = Map<String, Value>;

// =============================================================================
// Tool metadata
// =============================================================================

/// Public description of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    /// Parameter name → human-readable hint.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(alias = "createdat")]
    pub created_at: DateTime<Utc>,
}

impl Tool {
    pub fn new(name: &str, description: &str, parameters: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Built-in handler a tool name dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Echo,
    Time,
    Calculate,
}

impl ToolKind {
    /// Run the handler. `Err` carries the caller-facing error message.
    pub fn invoke(self, args: &ToolArgs) -> std::result::Result<Value, String> {
        match self {
            ToolKind::Echo => {
                let message = string_arg(args, "message", "Hello, World!");
                Ok(json!({ "message": message, "timestamp": Utc::now() }))
            }
            ToolKind::Time => Ok(json!({
                "utc": Utc::now(),
                "local": Local::now(),
                "timezone": local_timezone_id(),
            })),
            ToolKind::Calculate => {
                let expression = string_arg(args, "expression", "0");
                let result = calculator::evaluate(&expression)
                    .map_err(|e| format!("Invalid expression: {}", e))?;
                Ok(json!({
                    "expression": expression,
                    "result": calculator::number_to_json(result),
                }))
            }
        }
    }
}

/// Read `name` as a string: strings verbatim, other JSON values as their JSON
/// text, `null` or absent as `default`.
pub fn string_arg(args: &ToolArgs, name: &str, default: &str) -> String {
    match args.get(name) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Best-effort identifier of the process's local zone: `TZ` when set, else
/// the IANA name `/etc/localtime` links to, else the current UTC offset.
fn local_timezone_id() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.trim().is_empty() {
            return tz.trim_start_matches(':').to_string();
        }
    }
    std::fs::read_link("/etc/localtime")
        .ok()
        .as_deref()
        .and_then(zone_from_zoneinfo_path)
        .unwrap_or_else(|| Local::now().offset().to_string())
}

/// `/usr/share/zoneinfo/Europe/Berlin` → `Europe/Berlin`.
fn zone_from_zoneinfo_path(path: &Path) -> Option<String> {
    let (_, zone) = path.to_str()?.rsplit_once("zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

// =============================================================================
// Registry
// =============================================================================

/// Registered tool: metadata and handler.
#[derive(Debug, Clone)]
pub struct ToolEntry {
    pub tool: Tool,
    pub kind: ToolKind,
}

/// Name → handler table. Owns metadata and dispatch targets.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    /// lower-cased name → index into `entries`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registry holding `echo`, `time`, `calculate`, in that order.
    pub fn builtin() -> Result<Self> {
        let builtins = [
            (
                Tool::new(
                    "echo",
                    "Echoes back the provided message",
                    &[("message", "The message to echo back")],
                ),
                ToolKind::Echo,
            ),
            (
                Tool::new("time", "Returns the current time", &[]),
                ToolKind::Time,
            ),
            (
                Tool::new(
                    "calculate",
                    "Performs basic arithmetic calculations",
                    &[("expression", "Mathematical expression (e.g., '2+2')")],
                ),
                ToolKind::Calculate,
            ),
        ];
        Self::with_tools(builtins)
    }

    /// Registry holding `tools` in iteration order. Fails on the first blank
    /// or duplicate name.
    pub fn with_tools(tools: impl IntoIterator<Item = (Tool, ToolKind)>) -> Result<Self> {
        let mut registry = Self::new();
        for (tool, kind) in tools {
            registry.register(tool, kind)?;
        }
        Ok(registry)
    }

    /// Register a tool. Names are unique case-insensitively.
    pub fn register(&mut self, tool: Tool, kind: ToolKind) -> Result<()> {
        if tool.name.trim().is_empty() {
            return Err(Error::validation("Tool name cannot be empty"));
        }
        let key = tool.name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(Error::validation(format!(
                "Tool '{}' is already registered",
                tool.name
            )));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(ToolEntry { tool, kind });
        Ok(())
    }

    /// Case-insensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&ToolEntry> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// All tools in registration order.
    pub fn list(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> ToolArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_builtin_order() {
        let registry = ToolRegistry::builtin().unwrap();
        let names: Vec<String> = registry.list().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["echo", "time", "calculate"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_builtin_parameters() {
        let registry = ToolRegistry::builtin().unwrap();
        let calc = registry.resolve("calculate").unwrap();
        assert_eq!(
            calc.tool.parameters.get("expression").map(String::as_str),
            Some("Mathematical expression (e.g., '2+2')")
        );
        assert!(registry.resolve("time").unwrap().tool.parameters.is_empty());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = ToolRegistry::builtin().unwrap();
        assert_eq!(registry.resolve("ECHO").unwrap().kind, ToolKind::Echo);
        assert_eq!(registry.resolve("Time").unwrap().kind, ToolKind::Time);
        assert!(registry.resolve("doesnotexist").is_none());
    }

    #[test]
    fn test_register_rejects_blank_and_duplicate() {
        let mut registry = ToolRegistry::builtin().unwrap();
        assert!(registry
            .register(Tool::new("  ", "blank", &[]), ToolKind::Echo)
            .is_err());
        assert!(registry
            .register(Tool::new("Echo", "again", &[]), ToolKind::Echo)
            .is_err());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_with_tools_surfaces_duplicate() {
        let err = ToolRegistry::with_tools([
            (Tool::new("echo", "first", &[]), ToolKind::Echo),
            (Tool::new("ECHO", "second", &[]), ToolKind::Time),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.message(), "Tool 'ECHO' is already registered");
    }

    #[test]
    fn test_register_extends_dispatch() {
        let mut registry = ToolRegistry::builtin().unwrap();
        registry
            .register(Tool::new("shout", "Echo alias", &[]), ToolKind::Echo)
            .unwrap();
        assert_eq!(registry.resolve("SHOUT").unwrap().kind, ToolKind::Echo);
        assert_eq!(registry.list().last().unwrap().name, "shout");
    }

    #[test]
    fn test_zone_from_zoneinfo_path() {
        assert_eq!(
            zone_from_zoneinfo_path(Path::new("/usr/share/zoneinfo/Europe/Berlin")).as_deref(),
            Some("Europe/Berlin")
        );
        assert_eq!(
            zone_from_zoneinfo_path(Path::new("../usr/share/zoneinfo/UTC")).as_deref(),
            Some("UTC")
        );
        assert_eq!(zone_from_zoneinfo_path(Path::new("/etc/zoneinfo/")), None);
        assert_eq!(zone_from_zoneinfo_path(Path::new("/var/db/timezone/tz")), None);
    }

    #[test]
    fn test_string_arg_coercion() {
        let a = args(json!({"s": "hi", "n": 42, "b": true, "z": null, "o": {"k": 1}}));
        assert_eq!(string_arg(&a, "s", "d"), "hi");
        assert_eq!(string_arg(&a, "n", "d"), "42");
        assert_eq!(string_arg(&a, "b", "d"), "true");
        assert_eq!(string_arg(&a, "z", "d"), "d");
        assert_eq!(string_arg(&a, "missing", "d"), "d");
        assert_eq!(string_arg(&a, "o", "d"), r#"{"k":1}"#);
    }

    #[test]
    fn test_echo_default_message() {
        let result = ToolKind::Echo.invoke(&ToolArgs::new()).unwrap();
        assert_eq!(result["message"], "Hello, World!");
        assert!(result["timestamp"].is_string());
    }

    #[test]
    fn test_calculate_default_expression() {
        let result = ToolKind::Calculate.invoke(&ToolArgs::new()).unwrap();
        assert_eq!(result, json!({"expression": "0", "result": 0}));
    }

    #[test]
    fn test_calculate_error_message() {
        let err = ToolKind::Calculate
            .invoke(&args(json!({"expression": "bogus"})))
            .unwrap_err();
        assert!(err.starts_with("Invalid expression:"), "{}", err);
    }

    #[test]
    fn test_tool_serializes_camel_case() {
        let tool = Tool::new("echo", "Echoes", &[("message", "hint")]);
        let value = serde_json::to_value(&tool).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["parameters"]["message"], "hint");
    }
}
