pub mod schema;

pub use schema::GatewayConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api_base_url`.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Default config path (<config dir>/openai-mcp/config.toml).
pub fn default_config_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.config_dir().join("openai-mcp").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("openai-mcp.toml"))
}

/// Expand a user-supplied path that may start with `~`.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<GatewayConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GatewayConfig =
            toml::from_str(&contents).context("Failed to parse gateway config (TOML)")?;
        Ok(config)
    } else {
        Ok(GatewayConfig::default())
    }
}

/// Load config and apply environment overrides.
pub fn resolve_config(path: &Path) -> Result<GatewayConfig> {
    let config = load_config(path)?;
    Ok(config.with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
}
