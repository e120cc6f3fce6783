//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_API_URL` - Shop API base URL (default: `http://localhost:8000/api`)
//! - `STOREFRONT_STATE_PATH` - File holding the persisted selection
//!   (default: `.uniformes-state.json`)
//! - `STOREFRONT_SAMPLE_FALLBACK` - Substitute built-in sample data when a list
//!   fetch fails (`true`/`false`, default: `true`)
//! - `STOREFRONT_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::fallback::FallbackPolicy;

/// API base used when `STOREFRONT_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// State file used when `STOREFRONT_STATE_PATH` is unset.
pub const DEFAULT_STATE_PATH: &str = ".uniformes-state.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop API base URL, e.g. `https://shop.example.com/api`
    pub api_url: Url,
    /// Path of the durable selection file
    pub state_path: PathBuf,
    /// What list fetches do when the backend is unreachable
    pub fallback: FallbackPolicy,
    /// Optional per-request timeout
    pub http_timeout: Option<Duration>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            fallback: FallbackPolicy::SampleData,
            http_timeout: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("STOREFRONT_API_URL", DEFAULT_API_URL))?;
        let state_path = PathBuf::from(get_env_or_default("STOREFRONT_STATE_PATH", DEFAULT_STATE_PATH));
        let fallback = get_optional_env("STOREFRONT_SAMPLE_FALLBACK")
            .map(|value| parse_fallback(&value))
            .transpose()?
            .unwrap_or(FallbackPolicy::SampleData);
        let http_timeout = get_optional_env("STOREFRONT_HTTP_TIMEOUT_SECS")
            .map(|value| parse_timeout(&value))
            .transpose()?;

        Ok(Self {
            api_url,
            state_path,
            fallback,
            http_timeout,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Use a different API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not an absolute http(s) URL.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }

    /// API origin: the base URL with a trailing `/api` segment removed.
    ///
    /// Media paths returned by the backend are relative to this origin.
    #[must_use]
    pub fn api_origin(&self) -> String {
        api_origin(self.api_url.as_str())
    }
}

/// Strip a trailing `/api` segment (and trailing slashes) from a base URL.
#[must_use]
pub fn api_origin(api_url: &str) -> String {
    let trimmed = api_url.trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .to_string()
}

fn default_api_url() -> Url {
    #[allow(clippy::unwrap_used)] // constant, covered by tests
    Url::parse(DEFAULT_API_URL).unwrap()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_fallback(value: &str) -> Result<FallbackPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(FallbackPolicy::SampleData),
        "false" | "0" | "no" | "off" => Ok(FallbackPolicy::Disabled),
        other => Err(ConfigError::InvalidEnvVar(
            "STOREFRONT_SAMPLE_FALLBACK".to_string(),
            format!("expected true or false, got '{other}'"),
        )),
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })
}
