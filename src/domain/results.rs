//! Normalized results returned to the host framework.
//!
//! Each operation resolves to exactly one of these shapes; gateway and
//! transport failures are folded into the `Failed`/`Declined` variants.

use serde::{Deserialize, Serialize};

/// Normalized transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Funds are held on the card.
    Authorized,

    /// The card issuer or gateway rejected the charge.
    Declined,

    /// The operation failed for any other reason.
    Failed,

    /// Held funds were captured.
    Settled,

    /// The authorization was released.
    Cancelled,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionStatus::Authorized => "AUTHORIZED",
            TransactionStatus::Declined => "DECLINED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Settled => "SETTLED",
            TransactionStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of an authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transactionStatus", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationResult {
    Authorized {
        #[serde(rename = "processorTransactionId")]
        processor_transaction_id: String,
    },

    Declined {
        #[serde(rename = "declineReason")]
        decline_reason: String,
    },

    Failed {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl AuthorizationResult {
    pub fn status(&self) -> TransactionStatus {
        match self {
            AuthorizationResult::Authorized { .. } => TransactionStatus::Authorized,
            AuthorizationResult::Declined { .. } => TransactionStatus::Declined,
            AuthorizationResult::Failed { .. } => TransactionStatus::Failed,
        }
    }

    /// Transaction id to hand back on capture or cancel.
    pub fn processor_transaction_id(&self) -> Option<&str> {
        match self {
            AuthorizationResult::Authorized {
                processor_transaction_id,
            } => Some(processor_transaction_id),
            _ => None,
        }
    }
}

/// Outcome of a capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transactionStatus", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureResult {
    Settled,

    Failed {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl CaptureResult {
    pub fn status(&self) -> TransactionStatus {
        match self {
            CaptureResult::Settled => TransactionStatus::Settled,
            CaptureResult::Failed { .. } => TransactionStatus::Failed,
        }
    }
}

/// Outcome of a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transactionStatus", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelResult {
    Cancelled,

    Failed {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl CancelResult {
    pub fn status(&self) -> TransactionStatus {
        match self {
            CancelResult::Cancelled => TransactionStatus::Cancelled,
            CancelResult::Failed { .. } => TransactionStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn authorized_serializes_with_transaction_id() {
        let result = AuthorizationResult::Authorized {
            processor_transaction_id: "pi_123".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"transactionStatus": "AUTHORIZED", "processorTransactionId": "pi_123"})
        );
    }

    #[test]
    fn declined_serializes_with_reason() {
        let result = AuthorizationResult::Declined {
            decline_reason: "card declined".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"transactionStatus": "DECLINED", "declineReason": "card declined"})
        );
    }

    #[test]
    fn settled_and_cancelled_serialize_status_only() {
        assert_eq!(
            serde_json::to_value(CaptureResult::Settled).unwrap(),
            json!({"transactionStatus": "SETTLED"})
        );
        assert_eq!(
            serde_json::to_value(CancelResult::Cancelled).unwrap(),
            json!({"transactionStatus": "CANCELLED"})
        );
    }

    #[test]
    fn failed_parses_from_json() {
        let result: CaptureResult = serde_json::from_value(
            json!({"transactionStatus": "FAILED", "errorMessage": "No such payment_intent"}),
        )
        .unwrap();

        assert_eq!(result.status(), TransactionStatus::Failed);
    }

    #[test]
    fn status_accessors() {
        let declined = AuthorizationResult::Declined {
            decline_reason: "x".into(),
        };
        assert_eq!(declined.status(), TransactionStatus::Declined);
        assert_eq!(declined.processor_transaction_id(), None);
        assert_eq!(CancelResult::Cancelled.status(), TransactionStatus::Cancelled);
        assert_eq!(TransactionStatus::Settled.to_string(), "SETTLED");
    }
}
