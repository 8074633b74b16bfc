//! Inbound request shapes handed to a processor connection.
//!
//! Field names follow the host framework's camelCase JSON contract so requests
//! can be deserialized straight from its payloads.

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// API-key credentials configured for the processor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyCredentials {
    /// Gateway secret key used as the bearer token.
    pub api_key: SecretString,
}

impl ApiKeyCredentials {
    /// Create credentials from a raw API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }
}

/// Raw card details supplied for an authorization.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Name printed on the card. Not forwarded to the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,

    /// Primary account number.
    pub card_number: String,

    /// Expiry month (1-12).
    pub expiry_month: u8,

    /// Four-digit expiry year.
    pub expiry_year: u16,

    /// Card verification value.
    pub cvv: String,
}

impl CardDetails {
    pub fn new(
        card_number: impl Into<String>,
        expiry_month: u8,
        expiry_year: u16,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            cardholder_name: None,
            card_number: card_number.into(),
            expiry_month,
            expiry_year,
            cvv: cvv.into(),
        }
    }

    /// Set the cardholder name.
    pub fn with_cardholder_name(mut self, name: impl Into<String>) -> Self {
        self.cardholder_name = Some(name.into());
        self
    }

    /// Last four digits of the card number, for log lines.
    pub fn last4(&self) -> &str {
        let len = self.card_number.len();
        self.card_number.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

// Card number and CVV never reach log output.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("cardholder_name", &self.cardholder_name)
            .field("card_number", &format_args!("**** {}", self.last4()))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .finish()
    }
}

/// Request to authorize (hold) funds on a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    /// Credentials carried with the request.
    #[serde(skip_serializing)]
    pub processor_config: ApiKeyCredentials,

    /// Amount in the currency's minor unit.
    pub amount: u64,

    /// ISO 4217 currency code.
    pub currency_code: String,

    /// Card to authorize against.
    pub payment_method: CardDetails,
}

/// Request to capture a previously authorized transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    /// Credentials used for the capture call.
    pub processor_config: ApiKeyCredentials,

    /// Transaction id returned by a successful authorization.
    pub processor_transaction_id: String,
}

/// Request to cancel a previously authorized transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    /// Credentials used for the cancel call.
    pub processor_config: ApiKeyCredentials,

    /// Transaction id returned by a successful authorization.
    pub processor_transaction_id: String,
}
