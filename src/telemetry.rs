//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install the global tracing subscriber.
///
/// Fails if the filter is malformed or a subscriber is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| TelemetryError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let config = TelemetryConfig {
            log_level: "stripe_connection=loud".to_string(),
            json: false,
        };
        assert!(matches!(init(&config), Err(TelemetryError::InvalidFilter(_))));
    }

    #[test]
    fn second_install_fails() {
        let config = TelemetryConfig::default();
        // Another test may have installed one already; either way the
        // second attempt must be rejected.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(TelemetryError::Install(_))));
    }
}
