//! Mock gateway transport for testing.
//!
//! Provides a scripted implementation of `GatewayTransport` for unit and
//! integration tests. Supports:
//! - Queued responses, consumed in call order
//! - Transport error injection
//! - Call tracking

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::ports::{GatewayRequest, GatewayTransport, RawResponse, TransportError};

/// Mock gateway transport for testing.
///
/// # Example
///
/// ```ignore
/// let transport = MockGatewayTransport::new();
/// transport.push_response(200, r#"{"id":"pi_123"}"#);
/// transport.push_response(402, r#"{"error":{"message":"card declined"}}"#);
///
/// let connection = StripeConnection::with_transport(config, transport.clone());
/// let result = connection.authorize(request).await;
///
/// assert_eq!(transport.call_count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct MockGatewayTransport {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Outcomes returned by successive calls.
    script: VecDeque<Result<RawResponse, TransportError>>,

    /// Track calls for assertions.
    call_log: Vec<RecordedRequest>,
}

/// Recorded gateway call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: String,
    /// Bearer token the call was made with.
    pub api_key: String,
}

impl MockGatewayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a response for the next unanswered call.
    pub fn push_response(&self, status_code: u16, response_text: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back(Ok(RawResponse::new(status_code, response_text)));
    }

    /// Queue a transport failure for the next unanswered call.
    pub fn push_error(&self, error: TransportError) {
        self.inner.lock().unwrap().script.push_back(Err(error));
    }

    /// Number of queued outcomes not yet consumed.
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().script.len()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    /// Check if a path was called.
    pub fn was_called(&self, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.path == path)
    }
}

#[async_trait]
impl GatewayTransport for MockGatewayTransport {
    async fn post_form(&self, request: GatewayRequest) -> Result<RawResponse, TransportError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(RecordedRequest {
            path: request.path.clone(),
            body: request.body.clone(),
            api_key: request.api_key.expose_secret().clone(),
        });

        state.script.pop_front().unwrap_or_else(|| {
            Err(TransportError::Request(format!(
                "no scripted response for {}",
                request.path
            )))
        })
    }
}
