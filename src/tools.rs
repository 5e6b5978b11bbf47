//! Tool system through which agent runtimes discover and invoke tools.

use std::sync::Arc;

use async_trait::async_trait;
pub use rmcp::model::Tool;
use schemars::JsonSchema;
use serde_json::{Map, Value};

/// Error type for tool dispatch.
///
/// Failures of the tool's own work are reported inside its output; these
/// errors only cover calls that never reached the tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Trait for tools that can be called by LLMs.
#[async_trait]
pub trait ToolService: Send + Sync {
    /// List available tools.
    async fn list_tools(&self) -> Result<Vec<Tool>, ToolError>;

    /// Execute a tool.
    async fn call_tool(&self, name: String, args: Value) -> Result<Value, ToolError>;
}

/// Build a tool definition whose input schema is derived from `T`.
pub fn tool_definition<T: JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool::new(name, description, Arc::new(input_schema::<T>()))
}

/// JSON schema object for a tool input type.
pub fn input_schema<T: JsonSchema>() -> Map<String, Value> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => map,
        other => {
            tracing::warn!(
                "Input schema for {} is not a JSON object ({:?}); advertising an empty schema",
                std::any::type_name::<T>(),
                other
            );
            Map::new()
        }
    }
}
