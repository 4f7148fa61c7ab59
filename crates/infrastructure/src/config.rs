//! Configuration loading.
//!
//! Values come from `BAZAAR_*` environment variables layered over the
//! defaults of [`AppConfig`]. The result is validated once and never
//! re-read.

use std::path::PathBuf;

use bazaar_domain::{AppConfig, DomainError};
use config::{Config, Environment};
use tracing::{info, warn};

use crate::persistence::FileSessionStore;

/// Prefix of every recognized environment variable.
pub const ENV_PREFIX: &str = "BAZAAR";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is unusable.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Loads configuration from the process environment.
///
/// # Errors
///
/// Returns [`ConfigError`] when a variable has the wrong type or the result
/// fails validation.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    build(Environment::with_prefix(ENV_PREFIX))
}

/// Loads configuration from an explicit set of variables instead of the
/// process environment.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from<I, K, V>(vars: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: config::Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    build(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
}

fn build(environment: Environment) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = Config::builder()
        .add_source(environment.try_parsing(true))
        .build()?
        .try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Where the session file lives for this configuration.
#[must_use]
pub fn session_path(config: &AppConfig) -> PathBuf {
    config
        .session_file
        .clone()
        .unwrap_or_else(FileSessionStore::default_path)
}

/// Logs the effective configuration in development. Secrets are reported
/// by presence only.
pub fn log_startup_summary(config: &AppConfig) {
    if !config.is_development() {
        return;
    }
    if config.stripe_publishable_key.is_empty() {
        warn!("BAZAAR_STRIPE_PUBLISHABLE_KEY is not set");
    }
    info!(
        api_url = %config.api_url,
        ws_url = %config.ws_url(),
        environment = ?config.environment,
        has_stripe_key = !config.stripe_publishable_key.is_empty(),
        "app configuration"
    );
}
