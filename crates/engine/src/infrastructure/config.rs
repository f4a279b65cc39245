//! Engine configuration loaded from the environment.

use std::time::Duration;

use armory_domain::ApiKey;
use reqwest::Url;

use crate::infrastructure::armory::{DEFAULT_ARMORY_BASE_URL, DEFAULT_ARMORY_TIMEOUT};

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LOSTARK_API_BASE '{value}': {message}")]
    InvalidBaseUrl { value: String, message: String },
    #[error("Invalid ARMORY_TIMEOUT_SECS '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("Invalid server port '{0}'")]
    InvalidPort(String),
}

/// Immutable process configuration.
///
/// A missing API key is not a startup error: the server still runs and every
/// character lookup reports the missing credential.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api_key: Option<ApiKey>,
    pub armory_base_url: Url,
    pub armory_timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = ApiKey::from_optional(lookup("LOSTARK_API_KEY"));

        let base = non_blank("LOSTARK_API_BASE").unwrap_or_else(|| DEFAULT_ARMORY_BASE_URL.into());
        let armory_base_url = Url::parse(&base).map_err(|e| ConfigError::InvalidBaseUrl {
            value: base.clone(),
            message: e.to_string(),
        })?;
        if armory_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: base,
                message: "URL cannot carry a path".to_string(),
            });
        }

        let armory_timeout = match non_blank("ARMORY_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_ARMORY_TIMEOUT,
        };

        let server_host = non_blank("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.into());
        let server_port = match non_blank("SERVER_PORT").or_else(|| non_blank("PORT")) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            api_key,
            armory_base_url,
            armory_timeout,
            server_host,
            server_port,
            cors_allowed_origins: non_blank("CORS_ALLOWED_ORIGINS"),
        })
    }
}
