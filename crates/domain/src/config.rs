//! Runtime configuration model
//!
//! Loaded once at process start and never re-read. The loader lives in the
//! infrastructure crate; this module only holds the shape, defaults and
//! validation rules.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default API origin.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Default UI language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Deployment environment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default).
    #[default]
    Development,
    /// Automated tests.
    Test,
    /// Pre-production.
    Staging,
    /// Production.
    Production,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin every API path is resolved against.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// WebSocket origin. Falls back to `api_url`.
    #[serde(default)]
    pub ws_url: Option<String>,

    /// Publishable payment key, passed through to payment widgets.
    #[serde(default)]
    pub stripe_publishable_key: String,

    /// Deployment environment.
    #[serde(default, alias = "env")]
    pub environment: Environment,

    /// Whether analytics is enabled.
    #[serde(default)]
    pub enable_analytics: bool,

    /// Whether WebSocket features are enabled.
    #[serde(default = "default_true")]
    pub enable_websocket: bool,

    /// Default UI language code.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Timeout applied to every request, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Where the session is persisted. The loader picks a per-user data
    /// directory when unset.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ws_url: None,
            stripe_publishable_key: String::new(),
            environment: Environment::default(),
            enable_analytics: false,
            enable_websocket: true,
            default_language: default_language(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            session_file: None,
        }
    }
}

impl AppConfig {
    /// Returns true in production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Returns true in development.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Request/response traffic is only logged outside production.
    #[must_use]
    pub fn log_traffic(&self) -> bool {
        !self.is_production()
    }

    /// Effective WebSocket origin.
    #[must_use]
    pub fn ws_url(&self) -> &str {
        self.ws_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(&self.api_url)
    }

    /// Default per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Parses the API origin.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] unless `api_url` is an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> DomainResult<Url> {
        let url = Url::parse(self.api_url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme `{}`: {}",
                url.scheme(),
                self.api_url
            )));
        }
        Ok(url)
    }

    /// Validates the loaded values.
    ///
    /// # Errors
    ///
    /// Fails on an unusable API URL, a zero timeout or an empty language.
    pub fn validate(&self) -> DomainResult<()> {
        self.base_url()?;
        if self.request_timeout_ms == 0 {
            return Err(DomainError::InvalidConfig {
                key: "request_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.default_language.trim().is_empty() {
            return Err(DomainError::InvalidConfig {
                key: "default_language",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
