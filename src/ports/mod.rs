//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProcessorConnection` - inbound contract called by the host framework
//! - `GatewayTransport` - outbound HTTP calls to the payment gateway

mod gateway_transport;
mod processor_connection;

pub use gateway_transport::{GatewayRequest, GatewayTransport, RawResponse, TransportError};
pub use processor_connection::ProcessorConnection;
