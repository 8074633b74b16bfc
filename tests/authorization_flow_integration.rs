//! Integration tests for the authorize → capture/cancel lifecycle.
//!
//! Drives the connection through its public API with a scripted transport:
//! 1. Authorization id flows back unchanged into capture and cancel
//! 2. Failures surface as result values, never as errors
//! 3. Independent operations run concurrently on one shared connection
//! 4. Results serialize to the host framework's JSON shapes

use std::sync::Arc;

use serde_json::json;

use stripe_connection::adapters::{MockGatewayTransport, StripeConnection};
use stripe_connection::config::GatewayConfig;
use stripe_connection::domain::{
    AuthorizationRequest, AuthorizationResult, CancelRequest, CancelResult, CaptureRequest,
    CaptureResult, TransactionStatus,
};
use stripe_connection::ports::ProcessorConnection;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn connection() -> (StripeConnection<MockGatewayTransport>, MockGatewayTransport) {
    let transport = MockGatewayTransport::new();
    let config = GatewayConfig::new("acct_flow", "sk_test_flow");
    (
        StripeConnection::with_transport(config, transport.clone()),
        transport,
    )
}

fn authorization_request() -> AuthorizationRequest {
    serde_json::from_value(json!({
        "processorConfig": {"apiKey": "sk_test_host"},
        "amount": 1000,
        "currencyCode": "EUR",
        "paymentMethod": {
            "cardholderName": "Ada Lovelace",
            "cardNumber": "4242424242424242",
            "expiryMonth": 4,
            "expiryYear": 2030,
            "cvv": "123"
        }
    }))
    .unwrap()
}

fn capture_request(transaction_id: &str) -> CaptureRequest {
    serde_json::from_value(json!({
        "processorConfig": {"apiKey": "sk_test_host"},
        "processorTransactionId": transaction_id
    }))
    .unwrap()
}

fn cancel_request(transaction_id: &str) -> CancelRequest {
    serde_json::from_value(json!({
        "processorConfig": {"apiKey": "sk_test_host"},
        "processorTransactionId": transaction_id
    }))
    .unwrap()
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn authorize_then_capture() {
    let (connection, transport) = connection();
    transport.push_response(200, r#"{"id":"pi_123"}"#);
    transport.push_response(200, r#"{"id":"pm_456"}"#);
    transport.push_response(200, r#"{"id":"pi_123"}"#);
    transport.push_response(200, r#"{"id":"pi_123"}"#);
    transport.push_response(200, r#"{"id":"pi_123","status":"succeeded"}"#);

    let authorized = connection.authorize(authorization_request()).await;
    let transaction_id = authorized.processor_transaction_id().unwrap().to_string();
    let captured = connection.capture(capture_request(&transaction_id)).await;

    assert_eq!(transaction_id, "pi_123");
    assert_eq!(captured, CaptureResult::Settled);
    assert!(transport.was_called("/v1/payment_intents/pi_123/capture"));
    assert_eq!(transport.pending(), 0);
}

#[tokio::test]
async fn authorize_then_cancel() {
    let (connection, transport) = connection();
    for body in [
        r#"{"id":"pi_9"}"#,
        r#"{"id":"pm_9"}"#,
        r#"{"id":"pi_9"}"#,
        r#"{"id":"pi_9"}"#,
        r#"{"id":"pi_9","status":"canceled"}"#,
    ] {
        transport.push_response(200, body);
    }

    let authorized = connection.authorize(authorization_request()).await;
    let transaction_id = authorized.processor_transaction_id().unwrap().to_string();
    let cancelled = connection.cancel(cancel_request(&transaction_id)).await;

    assert_eq!(cancelled.status(), TransactionStatus::Cancelled);
    assert!(transport.was_called("/v1/payment_intents/pi_9/cancel"));
}

#[tokio::test]
async fn declined_authorization_serializes_for_host() {
    let (connection, transport) = connection();
    transport.push_response(402, r#"{"error":{"message":"card declined"}}"#);

    let result = connection.authorize(authorization_request()).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"declineReason": "card declined", "transactionStatus": "DECLINED"})
    );
}

#[tokio::test]
async fn authorized_result_serializes_for_host() {
    let (connection, transport) = connection();
    transport.push_response(200, r#"{"id":"pi_123"}"#);
    transport.push_response(200, r#"{"id":"pm_456"}"#);
    transport.push_response(200, r#"{"id":"pi_123"}"#);
    transport.push_response(200, r#"{"id":"pi_123"}"#);

    let result = connection.authorize(authorization_request()).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"processorTransactionId": "pi_123", "transactionStatus": "AUTHORIZED"})
    );
}

#[tokio::test]
async fn exhausted_gateway_script_still_returns_result() {
    let (connection, transport) = connection();
    transport.push_response(200, r#"{"id":"pi_123"}"#);

    let result = connection.authorize(authorization_request()).await;

    assert!(matches!(result, AuthorizationResult::Failed { .. }));
    assert_eq!(transport.call_count(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_capture_and_cancel_on_shared_connection() {
    let (connection, transport) = connection();
    transport.push_response(200, r#"{"id":"pi_a"}"#);
    transport.push_response(200, r#"{"id":"pi_b"}"#);
    let connection: Arc<dyn ProcessorConnection> = Arc::new(connection);

    let capture = {
        let connection = Arc::clone(&connection);
        tokio::spawn(async move { connection.capture(capture_request("pi_a")).await })
    };
    let cancel = {
        let connection = Arc::clone(&connection);
        tokio::spawn(async move { connection.cancel(cancel_request("pi_b")).await })
    };

    let captured = capture.await.unwrap();
    let cancelled = cancel.await.unwrap();

    assert_eq!(captured, CaptureResult::Settled);
    assert_eq!(cancelled, CancelResult::Cancelled);

    let mut paths: Vec<String> = transport.calls().into_iter().map(|c| c.path).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/v1/payment_intents/pi_a/capture".to_string(),
            "/v1/payment_intents/pi_b/cancel".to_string(),
        ]
    );
}
