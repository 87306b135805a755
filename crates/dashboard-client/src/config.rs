//! Client settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then a configuration file, then
//! `DASHBOARD_CLIENT_*` environment variables.

use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:5000/api/users";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raised when the configured API URL is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid users API URL '{url}': {message}")]
pub struct InvalidApiUrl {
    /// The configured value.
    pub url: String,
    /// Parser message.
    pub message: String,
}

/// Where the users API lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD_CLIENT")]
pub struct ClientSettings {
    /// URL of the users collection.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ClientSettings {
    /// Parsed users collection URL, defaulting to the local backend.
    ///
    /// # Errors
    /// Returns [`InvalidApiUrl`] when the configured value does not parse.
    pub fn api_url(&self) -> Result<Url, InvalidApiUrl> {
        let raw = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Url::parse(raw).map_err(|error| InvalidApiUrl {
            url: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }
}
