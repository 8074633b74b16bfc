//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Stripe processor connection and its HTTP transport

pub mod stripe;

pub use stripe::{MockGatewayTransport, ReqwestTransport, StripeConnection};
