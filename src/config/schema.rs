//! Configuration schema for config.toml.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// OpenAI API base URL (without the `/v1` suffix).
    pub api_base_url: String,

    /// Name of the environment variable holding the API key.
    pub api_key_env: String,

    /// Per-request timeout applied by the HTTP client.
    pub request_timeout_secs: u64,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            request_timeout_secs: 600,
            log_level: "info".into(),
        }
    }
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Apply environment overrides on top of file values.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }
}
