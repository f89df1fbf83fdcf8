//! Tool infrastructure: registry, executor, and the calculator evaluator.
//!
//! The registry is built once at startup and shared read-only; the executor
//! turns every call (known or not) into a [`ToolResult`] envelope.

pub mod calculator;
pub mod executor;
pub mod registry;

pub use executor::{ToolExecutor, ToolResult};
pub use registry::{Tool, ToolArgs, ToolEntry, ToolKind, ToolRegistry};
