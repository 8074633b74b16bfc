//! Stripe processor connection.
//!
//! Implements the `ProcessorConnection` port on top of Stripe payment intents.
//!
//! # Authorization flow
//!
//! ```text
//! POST /v1/payment_intents                 amount, currency, capture_method=manual
//! POST /v1/payment_methods                 type=card, card[...]
//! POST /v1/payment_intents/{id}            payment_method={pm}
//! POST /v1/payment_intents/{id}/confirm
//! ```
//!
//! Each step runs only if the previous one returned 200. The first failure
//! ends the flow: status 402 becomes `Declined`, anything else `Failed`.
//!
//! # Credentials
//!
//! Authorize uses the API key from [`GatewayConfig`]. Capture and cancel use
//! the key carried in the request's `processor_config`.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::config::GatewayConfig;
use crate::domain::{
    encode_fields, AuthorizationRequest, AuthorizationResult, CancelRequest, CancelResult,
    CaptureRequest, CaptureResult, GatewayObject,
};
use crate::ports::{
    GatewayRequest, GatewayTransport, ProcessorConnection, RawResponse, TransportError,
};

use super::gateway_types::{check_status, check_status_code, GatewayFailure, StripeObject};
use super::http_transport::ReqwestTransport;

const PAYMENT_INTENTS_PATH: &str = "/v1/payment_intents";
const PAYMENT_METHODS_PATH: &str = "/v1/payment_methods";

/// Gateway call being made, for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    CreatePaymentIntent,
    CreatePaymentMethod,
    AttachPaymentMethod,
    ConfirmPaymentIntent,
    CapturePaymentIntent,
    CancelPaymentIntent,
}

impl Step {
    fn as_str(self) -> &'static str {
        match self {
            Step::CreatePaymentIntent => "create_payment_intent",
            Step::CreatePaymentMethod => "create_payment_method",
            Step::AttachPaymentMethod => "attach_payment_method",
            Step::ConfirmPaymentIntent => "confirm_payment_intent",
            Step::CapturePaymentIntent => "capture_payment_intent",
            Step::CancelPaymentIntent => "cancel_payment_intent",
        }
    }
}

/// Payment intent created with manual capture, no payment method yet.
#[derive(Debug)]
struct CreatedIntent {
    id: String,
}

/// Payment intent with a payment method attached; the only state that can be
/// confirmed.
#[derive(Debug)]
struct AttachedIntent {
    id: String,
}

/// Stripe processor connection.
pub struct StripeConnection<T = ReqwestTransport> {
    config: GatewayConfig,
    transport: T,
}

impl StripeConnection<ReqwestTransport> {
    /// Create a connection that talks to the configured gateway over HTTP.
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: GatewayTransport> StripeConnection<T> {
    /// Create a connection over a custom transport.
    pub fn with_transport(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn send(
        &self,
        step: Step,
        path: String,
        api_key: &SecretString,
        body: String,
    ) -> Result<RawResponse, GatewayFailure> {
        self.transport
            .post_form(GatewayRequest::new(path, api_key.clone(), body))
            .await
            .map_err(|e| {
                tracing::error!(step = step.as_str(), error = %e, "Stripe request failed");
                GatewayFailure::from(e)
            })
    }

    /// Send one call and parse the returned object.
    async fn post(
        &self,
        step: Step,
        path: String,
        api_key: &SecretString,
        body: String,
    ) -> Result<StripeObject, GatewayFailure> {
        let response = self.send(step, path, api_key, body).await?;

        let object = check_status(&response)?;
        tracing::debug!(
            step = step.as_str(),
            object_id = object.id.as_deref().unwrap_or_default(),
            status = object.status.as_deref().unwrap_or_default(),
            "Stripe step succeeded"
        );
        Ok(object)
    }

    async fn create_payment_intent(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<CreatedIntent, GatewayFailure> {
        let body = format!(
            "{}capture_method=manual",
            encode_fields(request, GatewayObject::PaymentIntent)?
        );

        let id = self
            .post(
                Step::CreatePaymentIntent,
                PAYMENT_INTENTS_PATH.to_string(),
                self.config.api_key(),
                body,
            )
            .await?
            .into_id()?;

        Ok(CreatedIntent { id })
    }

    async fn create_payment_method(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<String, GatewayFailure> {
        let body = format!(
            "type=card&{}",
            encode_fields(request, GatewayObject::PaymentMethod)?
        );

        self.post(
            Step::CreatePaymentMethod,
            PAYMENT_METHODS_PATH.to_string(),
            self.config.api_key(),
            body,
        )
        .await?
        .into_id()
    }

    async fn attach_payment_method(
        &self,
        intent: CreatedIntent,
        payment_method_id: &str,
    ) -> Result<AttachedIntent, GatewayFailure> {
        self.post(
            Step::AttachPaymentMethod,
            format!("{}/{}", PAYMENT_INTENTS_PATH, intent.id),
            self.config.api_key(),
            format!("payment_method={}", payment_method_id),
        )
        .await?;

        Ok(AttachedIntent { id: intent.id })
    }

    async fn confirm_payment_intent(&self, intent: AttachedIntent) -> Result<String, GatewayFailure> {
        let confirmed_id = self
            .post(
                Step::ConfirmPaymentIntent,
                format!("{}/{}/confirm", PAYMENT_INTENTS_PATH, intent.id),
                self.config.api_key(),
                String::new(),
            )
            .await?
            .into_id()?;

        if confirmed_id != intent.id {
            tracing::warn!(
                intent_id = %intent.id,
                confirmed_id = %confirmed_id,
                "Confirmed payment intent id differs from created id"
            );
        }

        Ok(confirmed_id)
    }

    async fn run_authorization(&self, request: &AuthorizationRequest) -> Result<String, GatewayFailure> {
        let intent = self.create_payment_intent(request).await?;
        let payment_method_id = self.create_payment_method(request).await?;
        let intent = self.attach_payment_method(intent, &payment_method_id).await?;
        self.confirm_payment_intent(intent).await
    }

    /// POST to an action sub-path of an existing intent with the request's key.
    ///
    /// Only the status code decides the outcome; the body is read on failure.
    async fn intent_action(
        &self,
        step: Step,
        transaction_id: &str,
        action: &str,
        api_key: &SecretString,
    ) -> Result<(), GatewayFailure> {
        let response = self
            .send(
                step,
                format!("{}/{}/{}", PAYMENT_INTENTS_PATH, transaction_id, action),
                api_key,
                String::new(),
            )
            .await?;

        check_status_code(&response)?;
        tracing::debug!(step = step.as_str(), transaction_id, "Stripe step succeeded");
        Ok(())
    }
}

/// Map the first failure of an authorization to its normalized result.
fn classify_authorization_failure(failure: &GatewayFailure) -> AuthorizationResult {
    let message = failure.gateway_message();
    if failure.is_decline() {
        AuthorizationResult::Declined {
            decline_reason: message,
        }
    } else {
        AuthorizationResult::Failed {
            error_message: message,
        }
    }
}

#[async_trait]
impl<T: GatewayTransport> ProcessorConnection for StripeConnection<T> {
    fn name(&self) -> &'static str {
        "STRIPE"
    }

    fn website(&self) -> &'static str {
        "stripe.com"
    }

    async fn authorize(&self, request: AuthorizationRequest) -> AuthorizationResult {
        match self.run_authorization(&request).await {
            Ok(processor_transaction_id) => {
                tracing::info!(
                    account_id = %self.config.account_id,
                    transaction_id = %processor_transaction_id,
                    amount = request.amount,
                    currency = %request.currency_code,
                    card_last4 = request.payment_method.last4(),
                    "Payment authorized"
                );
                AuthorizationResult::Authorized {
                    processor_transaction_id,
                }
            }
            Err(failure) => {
                let result = classify_authorization_failure(&failure);
                tracing::warn!(
                    account_id = %self.config.account_id,
                    status_code = failure.status_code(),
                    outcome = %result.status(),
                    error = %failure,
                    "Payment authorization unsuccessful"
                );
                result
            }
        }
    }

    async fn capture(&self, request: CaptureRequest) -> CaptureResult {
        let outcome = self
            .intent_action(
                Step::CapturePaymentIntent,
                &request.processor_transaction_id,
                "capture",
                &request.processor_config.api_key,
            )
            .await;

        match outcome {
            Ok(()) => {
                tracing::info!(
                    transaction_id = %request.processor_transaction_id,
                    "Payment captured"
                );
                CaptureResult::Settled
            }
            Err(failure) => {
                tracing::warn!(
                    transaction_id = %request.processor_transaction_id,
                    status_code = failure.status_code(),
                    error = %failure,
                    "Payment capture failed"
                );
                CaptureResult::Failed {
                    error_message: failure.gateway_message(),
                }
            }
        }
    }

    async fn cancel(&self, request: CancelRequest) -> CancelResult {
        let outcome = self
            .intent_action(
                Step::CancelPaymentIntent,
                &request.processor_transaction_id,
                "cancel",
                &request.processor_config.api_key,
            )
            .await;

        match outcome {
            Ok(()) => {
                tracing::info!(
                    transaction_id = %request.processor_transaction_id,
                    "Payment cancelled"
                );
                CancelResult::Cancelled
            }
            Err(failure) => {
                tracing::warn!(
                    transaction_id = %request.processor_transaction_id,
                    status_code = failure.status_code(),
                    error = %failure,
                    "Payment cancel failed"
                );
                CancelResult::Failed {
                    error_message: failure.gateway_message(),
                }
            }
        }
    }
}
