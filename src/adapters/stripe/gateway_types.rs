//! Stripe response objects and failure classification.
//!
//! Every gateway call funnels through [`check_status`]: a 200 response is
//! parsed into a [`StripeObject`], anything else becomes a
//! [`GatewayFailure::Status`] carrying the code and raw body.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::EncodingError;
use crate::ports::{RawResponse, TransportError};

/// Status Stripe uses for card declines ("402 Payment Required").
pub const DECLINE_STATUS: u16 = 402;

// ════════════════════════════════════════════════════════════════════════════════
// Response Objects
// ════════════════════════════════════════════════════════════════════════════════

/// Minimal view of any Stripe API object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeObject {
    /// Object ID (pi_..., pm_...).
    #[serde(default)]
    pub id: Option<String>,

    /// Object type ("payment_intent", "payment_method").
    #[serde(default)]
    pub object: Option<String>,

    /// Lifecycle status, when the object has one.
    #[serde(default)]
    pub status: Option<String>,
}

impl StripeObject {
    /// The object's id, or a malformed-response failure if it has none.
    pub fn into_id(self) -> Result<String, GatewayFailure> {
        self.id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GatewayFailure::MalformedResponse("response has no id".to_string()))
    }
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Stripe error object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Human-readable message, passed through to the caller.
    #[serde(default)]
    pub message: Option<String>,

    /// Error category ("card_error", "invalid_request_error", ...).
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Machine-readable code ("card_declined", "resource_missing", ...).
    #[serde(default)]
    pub code: Option<String>,

    /// Issuer decline code for card errors.
    #[serde(default)]
    pub decline_code: Option<String>,
}

#[derive(Deserialize)]
struct TopLevelMessage {
    message: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Failures
// ════════════════════════════════════════════════════════════════════════════════

/// Why a gateway call did not yield a usable object.
#[derive(Debug, Error)]
pub enum GatewayFailure {
    #[error("gateway responded with status {status_code}")]
    Status {
        status_code: u16,
        response_text: String,
    },

    #[error("gateway unreachable: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected gateway response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl GatewayFailure {
    /// HTTP status code, for failures that produced a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GatewayFailure::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether the gateway classified this as a card decline.
    pub fn is_decline(&self) -> bool {
        self.status_code() == Some(DECLINE_STATUS)
    }

    /// Parsed error object from the response body, if there is one.
    pub fn api_error(&self) -> Option<StripeApiError> {
        match self {
            GatewayFailure::Status { response_text, .. } => {
                serde_json::from_str::<StripeErrorEnvelope>(response_text)
                    .ok()
                    .map(|envelope| envelope.error)
            }
            _ => None,
        }
    }

    /// Message to surface to the caller.
    ///
    /// For status failures this is the gateway's `error.message`, falling back
    /// to a top-level `message`, then the raw body, then a status description.
    pub fn gateway_message(&self) -> String {
        let GatewayFailure::Status {
            status_code,
            response_text,
        } = self
        else {
            return self.to_string();
        };

        if let Some(message) = self.api_error().and_then(|error| error.message) {
            return message;
        }

        if let Ok(top) = serde_json::from_str::<TopLevelMessage>(response_text) {
            return top.message;
        }

        let trimmed = response_text.trim();
        if trimmed.is_empty() {
            format!("gateway responded with status {}", status_code)
        } else {
            trimmed.to_string()
        }
    }
}

/// Status gate shared by every gateway response: only 200 passes.
///
/// The body is not inspected on success.
pub fn check_status_code(response: &RawResponse) -> Result<(), GatewayFailure> {
    if response.status_code != 200 {
        return Err(GatewayFailure::Status {
            status_code: response.status_code,
            response_text: response.response_text.clone(),
        });
    }
    Ok(())
}

/// Status check for steps that read the returned object.
///
/// Succeeds only on status 200 with a JSON object body.
pub fn check_status(response: &RawResponse) -> Result<StripeObject, GatewayFailure> {
    check_status_code(response)?;

    serde_json::from_str(&response.response_text)
        .map_err(|e| GatewayFailure::MalformedResponse(format!("invalid JSON: {}", e)))
}
