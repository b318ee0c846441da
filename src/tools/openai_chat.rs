//! The `openai_chat` tool: forwards a conversation to the completion API.

use super::traits::Tool;
use crate::mcp::protocol::ToolCallResult;
use crate::openai::ChatCompletion;
use crate::types::{ChatMessage, ChatModel};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

pub const TOOL_NAME: &str = "openai_chat";

/// Text returned when the API produced no content.
pub const NO_RESPONSE: &str = "No response received";

/// Prefix of every upstream failure message.
pub const API_ERROR_PREFIX: &str = "OpenAI API error: ";

/// Arguments accepted by `openai_chat`. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct ChatArgs {
    messages: Vec<ChatMessage>,
    #[serde(default, deserialize_with = "present_string")]
    model: Option<String>,
}

/// An absent key means "use the default"; an explicit `null` is not a string
/// and is rejected like any other non-string value.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

pub struct OpenAiChatTool {
    client: Arc<dyn ChatCompletion>,
}

impl OpenAiChatTool {
    pub fn new(client: Arc<dyn ChatCompletion>) -> Self {
        Self { client }
    }
}

/// Validate raw arguments into an ordered conversation and a model.
///
/// Fails closed: any shape mismatch is reported before the API is touched.
fn parse_args(args: serde_json::Value) -> Result<(Vec<ChatMessage>, ChatModel), String> {
    if !args.is_object() {
        return Err("Invalid arguments: expected an object".into());
    }

    let args: ChatArgs =
        serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))?;

    if args.messages.is_empty() {
        return Err("Invalid arguments: messages must contain at least one message".into());
    }

    let model = match args.model {
        Some(m) => m.parse::<ChatModel>().map_err(|e| e.to_string())?,
        None => ChatModel::default(),
    };

    Ok((args.messages, model))
}

#[async_trait]
impl Tool for OpenAiChatTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Chat with OpenAI models"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "messages": {
                    "type": "array",
                    "description": "Ordered conversation to send to the model",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "role": {
                                "type": "string",
                                "enum": ["system", "user", "assistant"]
                            },
                            "content": {
                                "type": "string"
                            }
                        },
                        "required": ["role", "content"]
                    }
                },
                "model": {
                    "type": "string",
                    "enum": ChatModel::identifiers(),
                    "default": ChatModel::default().as_str()
                }
            },
            "required": ["messages"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> ToolCallResult {
        let (messages, model) = match parse_args(args) {
            Ok(parsed) => parsed,
            Err(msg) => {
                warn!(tool = TOOL_NAME, error = %msg, "Rejected tool arguments");
                return ToolCallResult::error(msg);
            }
        };

        debug!(tool = TOOL_NAME, model = %model, messages = messages.len(), "Forwarding chat");

        match self.client.complete(model, &messages).await {
            Ok(content) => ToolCallResult::text(
                content
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| NO_RESPONSE.into()),
            ),
            Err(e) => {
                let msg = format!("{:#}", e);
                warn!(tool = TOOL_NAME, model = %model, error = %msg, "Chat completion failed");
                ToolCallResult::error(format!("{}{}", API_ERROR_PREFIX, msg))
            }
        }
    }
}
