//! Form encoding of requests into gateway objects.
//!
//! The gateway accepts `application/x-www-form-urlencoded` bodies whose keys
//! differ from the host framework's field names. [`encode_fields`] walks the
//! serialized field set of a request, keeps only the fields the target object
//! accepts, and renames them through a static table.
//!
//! Values are interpolated verbatim. A value containing `&` or `=` will corrupt
//! the body; callers that cannot rule this out must sanitize beforehand.

use serde_json::Value;
use thiserror::Error;

use super::requests::AuthorizationRequest;

/// Gateway object a body is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayObject {
    /// Payment intent: amount and currency.
    PaymentIntent,

    /// Payment method: card details, nested under `card[...]`.
    PaymentMethod,
}

const PAYMENT_INTENT_FIELDS: &[(&str, &str)] = &[("amount", "amount"), ("currencyCode", "currency")];

const PAYMENT_METHOD_FIELDS: &[(&str, &str)] = &[
    ("expiryMonth", "exp_month"),
    ("expiryYear", "exp_year"),
    ("cvv", "cvc"),
    ("cardNumber", "number"),
];

impl GatewayObject {
    /// Request field name to gateway field name.
    pub fn field_map(self) -> &'static [(&'static str, &'static str)] {
        match self {
            GatewayObject::PaymentIntent => PAYMENT_INTENT_FIELDS,
            GatewayObject::PaymentMethod => PAYMENT_METHOD_FIELDS,
        }
    }

    /// Gateway name for a request field, if this object accepts it.
    pub fn gateway_name(self, field: &str) -> Option<&'static str> {
        self.field_map()
            .iter()
            .find(|(from, _)| *from == field)
            .map(|(_, to)| *to)
    }

    fn wire_key(self, gateway_name: &str) -> String {
        match self {
            GatewayObject::PaymentIntent => gateway_name.to_string(),
            GatewayObject::PaymentMethod => format!("card[{}]", gateway_name),
        }
    }
}

/// Errors building an encoded body.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("request could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("expected a field set but found {0}")]
    NotAnObject(&'static str),
}

/// Encode the fields of `request` accepted by `object` as `key=value&` pairs.
///
/// Payment-intent encoding reads the request's top-level fields; payment-method
/// encoding reads the nested card details. Unrecognized and null fields are
/// skipped. The output keeps its trailing `&` so fixed pairs can be appended.
pub fn encode_fields(
    request: &AuthorizationRequest,
    object: GatewayObject,
) -> Result<String, EncodingError> {
    let data = match object {
        GatewayObject::PaymentIntent => serde_json::to_value(request)?,
        GatewayObject::PaymentMethod => serde_json::to_value(&request.payment_method)?,
    };

    let fields = match data {
        Value::Object(fields) => fields,
        other => return Err(EncodingError::NotAnObject(kind_of(&other))),
    };

    let mut body = String::new();
    for (key, value) in &fields {
        let Some(gateway_name) = object.gateway_name(key) else {
            continue;
        };
        let Some(value) = scalar_text(value) else {
            continue;
        };
        body.push_str(&object.wire_key(gateway_name));
        body.push('=');
        body.push_str(&value);
        body.push('&');
    }

    Ok(body)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
