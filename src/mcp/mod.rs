//! Model Context Protocol surface: JSON-RPC types, dispatch and stdio transport.

pub mod error;
pub mod handler;
pub mod protocol;
pub mod server;

pub use error::McpError;
pub use handler::McpHandler;
pub use server::StdioServer;
