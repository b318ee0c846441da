pub mod openai_chat;
pub mod traits;

pub use openai_chat::OpenAiChatTool;
pub use traits::{Tool, ToolDefinition};

use crate::error::{GatewayError, Result};
use crate::mcp::protocol::ToolCallResult;
use crate::openai::ChatCompletion;
use std::sync::Arc;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Tool gateway
// ---------------------------------------------------------------------------

/// Registry of callable tools and the single dispatch point for invocations.
///
/// Immutable after construction. Invocations share nothing but the tool list
/// and the tools' client handles, so concurrent calls need no locking.
pub struct ToolGateway {
    tools: Vec<Arc<dyn Tool>>,
    definitions: Vec<ToolDefinition>,
}

impl ToolGateway {
    /// Gateway exposing `openai_chat` backed by `client`.
    pub fn new(client: Arc<dyn ChatCompletion>) -> Self {
        let tool: Arc<dyn Tool> = Arc::new(OpenAiChatTool::new(client));
        Self {
            definitions: vec![tool.definition()],
            tools: vec![tool],
        }
    }

    /// Descriptors of every registered tool.
    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Invoke a tool by exact name.
    ///
    /// Unknown names are the only protocol-level failure; everything else is
    /// reported inside the returned result.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<ToolCallResult> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| GatewayError::UnknownTool(name.to_string()))?;

        info!(tool = name, "Invoking tool");

        let args = arguments.unwrap_or_else(|| serde_json::json!({}));
        let result = tool.execute(args).await;

        if result.is_error {
            warn!(tool = name, "Tool returned an error result");
        }

        Ok(result)
    }
}
