//! Gateway transport port.
//!
//! Abstracts the single HTTP interaction the connection needs: POST a
//! form-encoded body to a gateway path with bearer authentication and hand back
//! the status code and body text, whatever the status. Interpreting the status
//! is left to the caller.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

/// Port for issuing requests against the payment gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// POST `request.body` to `request.path`.
    ///
    /// Returns `Ok` for every HTTP response, including non-2xx ones. `Err` is
    /// reserved for requests that never produced a response.
    async fn post_form(&self, request: GatewayRequest) -> Result<RawResponse, TransportError>;
}

/// One outbound gateway call.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    /// Path relative to the gateway base URL, e.g. `/v1/payment_intents`.
    pub path: String,

    /// Bearer token for the `Authorization` header.
    pub api_key: SecretString,

    /// Form-encoded body. May be empty.
    pub body: String,
}

impl GatewayRequest {
    pub fn new(path: impl Into<String>, api_key: SecretString, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            api_key,
            body: body.into(),
        }
    }
}

/// Status code and body of a gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub response_text: String,
}

impl RawResponse {
    pub fn new(status_code: u16, response_text: impl Into<String>) -> Self {
        Self {
            status_code,
            response_text: response_text.into(),
        }
    }
}

/// Failures that prevent a gateway response from being received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP client could not be built: {0}")]
    Client(String),
}
