//! Stripe processor connection adapter.
//!
//! Implements the `ProcessorConnection` port on Stripe payment intents:
//! - Manual-capture authorization (intent → method → attach → confirm)
//! - Capture and cancel of an authorized intent
//! - Status checking and decline classification of gateway responses
//!
//! # Configuration
//!
//! Required environment variables:
//! - `ACCOUNT_ID`: Stripe account identifier
//! - `API_KEY`: Stripe secret API key (sk_...)

mod gateway_types;
mod http_transport;
mod mock_transport;
mod stripe_connection;

pub use gateway_types::{
    check_status, check_status_code, GatewayFailure, StripeApiError, StripeErrorEnvelope,
    StripeObject, DECLINE_STATUS,
};
pub use http_transport::ReqwestTransport;
pub use mock_transport::{MockGatewayTransport, RecordedRequest};
pub use stripe_connection::StripeConnection;
