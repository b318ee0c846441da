//! Tool trait definition.

use crate::mcp::protocol::ToolCallResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Descriptor advertised to the host for one callable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// A tool the gateway can dispatch to.
///
/// `execute` never fails at the protocol level: argument and upstream
/// problems come back as error-flagged results the calling agent can read.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (used in `tools/call`).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn input_schema(&self) -> serde_json::Value;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> ToolCallResult;
}
