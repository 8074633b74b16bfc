//! Processor connection port.
//!
//! The contract a host payment-orchestration framework calls into. Every
//! operation resolves to a normalized result; gateway, transport and parsing
//! failures are reported through the result's `Failed`/`Declined` variants
//! rather than as errors.

use async_trait::async_trait;

use crate::domain::{
    AuthorizationRequest, AuthorizationResult, CancelRequest, CancelResult, CaptureRequest,
    CaptureResult,
};

/// Port implemented by each payment processor integration.
#[async_trait]
pub trait ProcessorConnection: Send + Sync {
    /// Processor identifier, e.g. `"STRIPE"`.
    fn name(&self) -> &'static str;

    /// Processor website.
    fn website(&self) -> &'static str;

    /// Authorize funds without capturing them.
    async fn authorize(&self, request: AuthorizationRequest) -> AuthorizationResult;

    /// Capture the funds held by a previous authorization.
    async fn capture(&self, request: CaptureRequest) -> CaptureResult;

    /// Release the funds held by a previous authorization.
    async fn cancel(&self, request: CancelRequest) -> CancelResult;
}
