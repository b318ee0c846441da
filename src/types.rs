//! Shared types used across the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// A chat message forwarded to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Model allow-list
// ---------------------------------------------------------------------------

/// Models the gateway is willing to forward to the remote API.
///
/// Nothing outside this enum is ever sent upstream: callers hand the client a
/// `ChatModel`, never a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatModel {
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "o1-preview")]
    O1Preview,
    #[serde(rename = "o1-mini")]
    O1Mini,
}

impl ChatModel {
    /// Every supported model, in advertised order.
    pub const ALL: [ChatModel; 4] = [
        ChatModel::Gpt4o,
        ChatModel::Gpt4oMini,
        ChatModel::O1Preview,
        ChatModel::O1Mini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::O1Preview => "o1-preview",
            Self::O1Mini => "o1-mini",
        }
    }

    /// Identifiers of all supported models.
    pub fn identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.as_str()).collect()
    }

    /// Comma-separated allow-list, as shown in validation messages.
    pub fn allow_list() -> String {
        Self::identifiers().join(", ")
    }
}

impl Default for ChatModel {
    fn default() -> Self {
        Self::Gpt4o
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a model identifier is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid model: {0}. Supported models: {list}", list = ChatModel::allow_list())]
pub struct UnsupportedModel(pub String);

impl FromStr for ChatModel {
    type Err = UnsupportedModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnsupportedModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trips_through_identifier() {
        for model in ChatModel::ALL {
            assert_eq!(model.as_str().parse::<ChatModel>(), Ok(model));
            assert_eq!(
                serde_json::to_value(model).unwrap(),
                serde_json::json!(model.as_str())
            );
        }
    }

    #[test]
    fn test_default_model_is_gpt_4o() {
        assert_eq!(ChatModel::default(), ChatModel::Gpt4o);
        assert_eq!(ChatModel::default().as_str(), "gpt-4o");
    }

    #[test]
    fn test_unsupported_model_message_lists_allow_list() {
        let err = "gpt-3.5-turbo".parse::<ChatModel>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid model: gpt-3.5-turbo. Supported models: gpt-4o, gpt-4o-mini, o1-preview, o1-mini"
        );
    }

    #[test]
    fn test_model_match_is_exact() {
        assert!("GPT-4o".parse::<ChatModel>().is_err());
        assert!(" gpt-4o".parse::<ChatModel>().is_err());
        assert!("".parse::<ChatModel>().is_err());
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        let role: Result<ChatRole, _> = serde_json::from_value(serde_json::json!("tool"));
        assert!(role.is_err());
        let role: ChatRole = serde_json::from_value(serde_json::json!("assistant")).unwrap();
        assert_eq!(role, ChatRole::Assistant);
    }
}
