//! API credential loading.

use crate::error::GatewayError;
use std::fmt;

/// Bearer credential for the OpenAI API. Read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, GatewayError> {
        Self::from_value(var, std::env::var(var).ok())
    }

    fn from_value(var: &str, value: Option<String>) -> Result<Self, GatewayError> {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => Ok(Self(v)),
            _ => Err(GatewayError::MissingApiKey {
                var: var.to_string(),
            }),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form for display, e.g. `sk-p…x9Zq`. Keys shorter than 16
    /// characters are masked entirely.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < 16 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
