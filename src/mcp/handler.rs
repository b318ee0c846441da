//! MCP request handler
//!
//! Maps JSON-RPC methods onto the tool gateway.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use crate::tools::ToolGateway;

pub const SERVER_NAME: &str = "openai-mcp";

pub struct McpHandler {
    gateway: Arc<ToolGateway>,
}

impl McpHandler {
    pub fn new(gateway: Arc<ToolGateway>) -> Self {
        Self { gateway }
    }

    /// Handle an incoming JSON-RPC message.
    ///
    /// Returns `None` for notifications, which never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        debug!(method = %request.method, id = ?id, "Handling MCP request");

        if request.is_notification() {
            debug!(method = %request.method, "Received notification");
            return None;
        }

        if request.jsonrpc != JSONRPC_VERSION {
            let msg = format!("unsupported jsonrpc version '{}'", request.jsonrpc);
            return Some(self.error_response(id, McpError::InvalidRequest(msg)));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id.clone()),
            "ping" => JsonRpcResponse::success(id.clone(), serde_json::json!({})),
            "tools/list" => self.handle_tools_list(id.clone()),
            "tools/call" => self.handle_tools_call(id.clone(), request.params).await,
            other => self.error_response(id.clone(), McpError::MethodNotFound(other.to_string())),
        };

        debug!(
            method = %request.method,
            id = ?id,
            has_error = response.error.is_some(),
            "Completed MCP request"
        );

        Some(response)
    }

    fn handle_initialize(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: crate::VERSION.to_string(),
            },
        };

        self.to_response(id, result)
    }

    fn handle_tools_list(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        debug!("Listing available tools");

        let result = ToolsListResult {
            tools: self.gateway.list_tools().to_vec(),
        };

        self.to_response(id, result)
    }

    async fn handle_tools_call(&self, id: Option<JsonRpcId>, params: Value) -> JsonRpcResponse {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "Failed to parse tool call params");
                return self.error_response(
                    id,
                    McpError::InvalidParams(format!("Failed to parse tool call params: {}", e)),
                );
            }
        };

        match self.gateway.call(&params.name, params.arguments).await {
            Ok(result) => self.to_response(id, result),
            Err(e) => {
                warn!(tool_name = %params.name, error = %e, "Tool call rejected");
                self.error_response(id, e.into())
            }
        }
    }

    fn to_response<T: serde::Serialize>(&self, id: Option<JsonRpcId>, result: T) -> JsonRpcResponse {
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => self.error_response(id, McpError::SerializationError(e)),
        }
    }

    fn error_response(&self, id: Option<JsonRpcId>, error: McpError) -> JsonRpcResponse {
        JsonRpcResponse::failure(id, error.into())
    }
}
