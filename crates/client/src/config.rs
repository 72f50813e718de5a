//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const API_URL_ENV: &str = "STOCKBATCH_API_URL";
pub const DOWNLOAD_DIR_ENV: &str = "STOCKBATCH_DOWNLOAD_DIR";
pub const REQUEST_TIMEOUT_ENV: &str = "STOCKBATCH_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL {0:?}: {1}")]
    InvalidApiUrl(String, String),
    #[error("invalid request timeout {0:?}")]
    InvalidTimeout(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Where the API lives and where downloaded label files go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL without trailing slash (default: "http://localhost:8080")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Directory receiving exported label files (default: "./downloads")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            download_dir: default_download_dir(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from `STOCKBATCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (unset keys use defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            config.api_url = url;
        }
        if let Some(dir) = lookup(DOWNLOAD_DIR_ENV) {
            config.download_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            config.request_timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?;
        }

        config.validated()
    }

    /// Check the API URL and normalize it (no trailing slash).
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let parsed = url::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidApiUrl(self.api_url.clone(), e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl(
                self.api_url.clone(),
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }
        let trimmed = self.api_url.trim_end_matches('/').len();
        self.api_url.truncate(trimmed);
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Shared HTTP client honoring the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))
    }
}
