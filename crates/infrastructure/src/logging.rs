//! Tracing bootstrap for binaries.

use std::env;

use bazaar_domain::AppConfig;
use tracing_subscriber::EnvFilter;

const DEVELOPMENT_FILTER: &str = "info,bazaar=debug,bazaar_application=debug,bazaar_infrastructure=debug";
const PRODUCTION_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Filter precedence:
/// 1) `RUST_LOG`
/// 2) `BAZAAR_LOG`
/// 3) a default picked from the environment name
///
/// Calling it twice is harmless.
pub fn init(config: &AppConfig) {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(filter_from_env(config))
        .with_writer(std::io::stderr)
        .try_init();
}

fn filter_from_env(config: &AppConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(value) = env::var("BAZAAR_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(value)
    {
        return filter;
    }

    EnvFilter::new(default_filter(config))
}

const fn default_filter(config: &AppConfig) -> &'static str {
    match config.environment {
        bazaar_domain::Environment::Production => PRODUCTION_FILTER,
        _ => DEVELOPMENT_FILTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_domain::Environment;

    #[test]
    fn production_defaults_to_info() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        assert_eq!(default_filter(&config), "info");
        assert!(default_filter(&AppConfig::default()).contains("bazaar_application=debug"));
    }
}
