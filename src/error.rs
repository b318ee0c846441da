//! Gateway error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The remote API credential was not found at startup.
    #[error("{var} environment variable is required")]
    MissingApiKey { var: String },

    /// No registered tool has this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
