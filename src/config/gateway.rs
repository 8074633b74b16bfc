//! Gateway configuration (Stripe)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::{ConfigError, ValidationError};

/// Default base URL for the Stripe API.
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Gateway connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Stripe account identifier (acct_...)
    pub account_id: String,

    /// Stripe secret API key, used by authorize
    api_key: SecretString,

    /// Base URL for the Stripe API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl GatewayConfig {
    /// Create a configuration pointing at the public Stripe API.
    pub fn new(account_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads:
    /// - `ACCOUNT_ID`
    /// - `API_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let account_id = read_env("ACCOUNT_ID")?;
        let api_key = read_env("API_KEY")?;
        Ok(Self::new(account_id, api_key))
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Bound every gateway call by `secs` seconds.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.api_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.api_key.expose_secret().starts_with("sk_live_")
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.account_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ACCOUNT_ID"));
        }

        let key = self.api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("API_KEY"));
        }
        if !(key.starts_with("sk_") || key.starts_with("rk_")) {
            return Err(ValidationError::InvalidApiKey);
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

fn read_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|source| ConfigError::MissingEnv { name, source })
}
