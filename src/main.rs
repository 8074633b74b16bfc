//! Command-line harness for the Stripe connection.
//!
//! ```text
//! stripe-connection authorize < authorization.json
//! stripe-connection capture   < capture.json
//! stripe-connection cancel    < cancel.json
//! ```
//!
//! Reads one request as JSON from stdin and prints the normalized result as
//! JSON to stdout. Logs go to stderr.

use std::io::Read;
use std::process::ExitCode;

use serde::de::DeserializeOwned;
use thiserror::Error;

use stripe_connection::adapters::StripeConnection;
use stripe_connection::config::{AppConfig, ConfigError};
use stripe_connection::ports::{ProcessorConnection, TransportError};
use stripe_connection::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: stripe-connection <authorize|capture|cancel> < request.json")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to read request from stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Authorize,
    Capture,
    Cancel,
}

impl Operation {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "authorize" => Some(Operation::Authorize),
            "capture" => Some(Operation::Capture),
            "cancel" => Some(Operation::Cancel),
            _ => None,
        }
    }
}

fn read_request<R: DeserializeOwned>() -> Result<R, CliError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(serde_json::from_str(&input)?)
}

async fn run(operation_arg: Option<String>) -> Result<String, CliError> {
    let operation = operation_arg
        .as_deref()
        .and_then(Operation::parse)
        .ok_or(CliError::Usage)?;

    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init(&config.telemetry)?;

    let connection = StripeConnection::new(config.gateway)?;
    tracing::info!(
        processor = connection.name(),
        operation = ?operation,
        test_mode = connection.config().is_test_mode(),
        "Running operation"
    );

    let output = match operation {
        Operation::Authorize => {
            serde_json::to_string_pretty(&connection.authorize(read_request()?).await)?
        }
        Operation::Capture => {
            serde_json::to_string_pretty(&connection.capture(read_request()?).await)?
        }
        Operation::Cancel => {
            serde_json::to_string_pretty(&connection.cancel(read_request()?).await)?
        }
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(std::env::args().nth(1)).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("stripe-connection: {}", e);
            ExitCode::FAILURE
        }
    }
}
