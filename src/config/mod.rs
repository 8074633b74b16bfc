//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STRIPE_CONNECTION` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use stripe_connection::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gateway at {}", config.gateway.base_url);
//! ```

mod error;
mod gateway;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use gateway::{GatewayConfig, DEFAULT_BASE_URL};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Gateway configuration (account, API key, endpoint)
    pub gateway: GatewayConfig,

    /// Log output configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Environment as read from the prefixed variables, before the gateway
/// fallback is applied.
#[derive(Debug, Deserialize)]
struct PrefixedConfig {
    gateway: Option<GatewayConfig>,

    #[serde(default)]
    telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STRIPE_CONNECTION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    /// 5. Falls back to plain `ACCOUNT_ID` / `API_KEY` when no prefixed
    ///    gateway section is set
    ///
    /// # Environment Variable Format
    ///
    /// - `STRIPE_CONNECTION__GATEWAY__API_KEY=sk_test_...` -> `gateway.api_key`
    /// - `STRIPE_CONNECTION__TELEMETRY__LOG_LEVEL=debug` -> `telemetry.log_level`
    /// - `API_KEY=sk_test_...` -> `gateway.api_key` (fallback)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let prefixed: PrefixedConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STRIPE_CONNECTION")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        let gateway = match prefixed.gateway {
            Some(gateway) => gateway,
            None => GatewayConfig::from_env()?,
        };

        Ok(Self {
            gateway,
            telemetry: prefixed.telemetry,
        })
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("STRIPE_CONNECTION__GATEWAY__ACCOUNT_ID", "acct_test");
        env::set_var("STRIPE_CONNECTION__GATEWAY__API_KEY", "sk_test_xxx");
    }

    fn clear_env() {
        env::remove_var("STRIPE_CONNECTION__GATEWAY__ACCOUNT_ID");
        env::remove_var("STRIPE_CONNECTION__GATEWAY__API_KEY");
        env::remove_var("STRIPE_CONNECTION__GATEWAY__BASE_URL");
        env::remove_var("STRIPE_CONNECTION__GATEWAY__REQUEST_TIMEOUT_SECS");
        env::remove_var("STRIPE_CONNECTION__TELEMETRY__LOG_LEVEL");
        env::remove_var("ACCOUNT_ID");
        env::remove_var("API_KEY");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.gateway.account_id, "acct_test");
        assert_eq!(config.gateway.api_key().expose_secret(), "sk_test_xxx");
        assert_eq!(config.gateway.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("STRIPE_CONNECTION__GATEWAY__BASE_URL", "http://localhost:12111");
        env::set_var("STRIPE_CONNECTION__GATEWAY__REQUEST_TIMEOUT_SECS", "15");
        env::set_var("STRIPE_CONNECTION__TELEMETRY__LOG_LEVEL", "debug");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.base_url, "http://localhost:12111");
        assert_eq!(config.gateway.request_timeout_secs, Some(15));
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_missing_gateway_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(matches!(result, Err(ConfigError::MissingEnv { .. })));
    }

    #[test]
    fn test_gateway_from_plain_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ACCOUNT_ID", "acct_plain");
        env::set_var("API_KEY", "sk_test_plain");
        let result = GatewayConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.account_id, "acct_plain");
        assert_eq!(config.api_key().expose_secret(), "sk_test_plain");
    }

    #[test]
    fn test_load_falls_back_to_plain_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("ACCOUNT_ID", "acct_plain");
        env::set_var("API_KEY", "sk_test_plain");
        env::set_var("STRIPE_CONNECTION__TELEMETRY__LOG_LEVEL", "warn");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.account_id, "acct_plain");
        assert_eq!(config.gateway.api_key().expose_secret(), "sk_test_plain");
        assert_eq!(config.gateway.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn test_prefixed_gateway_wins_over_plain_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        env::set_var("ACCOUNT_ID", "acct_plain");
        env::set_var("API_KEY", "sk_test_plain");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.account_id, "acct_test");
        assert_eq!(config.gateway.api_key().expose_secret(), "sk_test_xxx");
    }

    #[test]
    fn test_gateway_from_plain_env_missing_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("ACCOUNT_ID", "acct_plain");
        let result = GatewayConfig::from_env();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnv { name: "API_KEY", .. })
        ));
    }
}
