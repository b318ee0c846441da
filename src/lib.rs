//! openai-mcp: exposes OpenAI chat completions as an MCP tool.
//!
//! The host talks MCP (JSON-RPC 2.0) over stdio; the single `openai_chat`
//! tool validates its arguments and forwards them to the chat completions
//! endpoint.

pub mod config;
pub mod error;
pub mod mcp;
pub mod openai;
pub mod tools;
pub mod types;

pub use error::GatewayError;

/// Crate version, reported in `initialize`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
