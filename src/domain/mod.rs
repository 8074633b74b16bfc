//! Domain types for the processor connection.
//!
//! - `requests` - inbound authorize/capture/cancel shapes
//! - `results` - normalized outcomes returned to the host
//! - `encoding` - form encoding of requests into gateway objects

mod encoding;
mod requests;
mod results;

pub use encoding::{encode_fields, EncodingError, GatewayObject};
pub use requests::{
    ApiKeyCredentials, AuthorizationRequest, CancelRequest, CaptureRequest, CardDetails,
};
pub use results::{AuthorizationResult, CancelResult, CaptureResult, TransactionStatus};
