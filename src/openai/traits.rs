//! Completion backend trait.

use crate::types::{ChatMessage, ChatModel};
use anyhow::Result;
use async_trait::async_trait;

/// A remote chat-completion service.
///
/// The gateway holds one of these behind an `Arc` for its whole lifetime;
/// implementations must not rely on per-call mutable state.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Submit the ordered conversation to `model` and return the first
    /// choice's content, or `None` when the service returned none.
    async fn complete(&self, model: ChatModel, messages: &[ChatMessage]) -> Result<Option<String>>;
}
