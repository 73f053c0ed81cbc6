//! Server configuration parsed from environment variables.
//!
//! ERROR HANDLING
//! ==============
//! Missing required keys and malformed values fail startup with a
//! [`ConfigError`]; optional keys fall back to documented defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::net::types::ClientConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_URL: &str = "https://auth.opticalhub.dev";
pub const DEFAULT_API_URL: &str = "https://api.opticalhub.dev";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Typed server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub project_id: String,
    pub public_key: String,
    pub auth_url: String,
    pub api_url: String,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Required:
    /// - `OPTICALHUB_PROJECT_ID`
    /// - `OPTICALHUB_PUBLIC_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `OPTICALHUB_AUTH_URL`: hosted identity base URL
    /// - `OPTICALHUB_API_URL`: hosted record-store base URL
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or `PORT` is
    /// not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let base_url = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
                .trim()
                .trim_end_matches('/')
                .to_owned()
        };

        Ok(Self {
            port,
            project_id: required("OPTICALHUB_PROJECT_ID")?,
            public_key: required("OPTICALHUB_PUBLIC_KEY")?,
            auth_url: base_url("OPTICALHUB_AUTH_URL", DEFAULT_AUTH_URL),
            api_url: base_url("OPTICALHUB_API_URL", DEFAULT_API_URL),
        })
    }

    /// The subset the browser is allowed to see.
    #[must_use]
    pub fn public_config(&self) -> ClientConfig {
        ClientConfig {
            project_id: self.project_id.clone(),
            public_key: self.public_key.clone(),
            auth_url: self.auth_url.clone(),
            api_url: self.api_url.clone(),
        }
    }
}
