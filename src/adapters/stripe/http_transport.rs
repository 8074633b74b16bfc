//! reqwest implementation of the gateway transport.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use secrecy::ExposeSecret;

use crate::config::GatewayConfig;
use crate::ports::{GatewayRequest, GatewayTransport, RawResponse, TransportError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP transport against the gateway base URL.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout_secs: Option<u64>,
}

impl ReqwestTransport {
    /// Build a transport from gateway configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// Use an existing client (shares its connection pool).
    pub fn with_client(client: Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout_secs.unwrap_or_default(),
            }
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl GatewayTransport for ReqwestTransport {
    async fn post_form(&self, request: GatewayRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(self.url(&request.path))
            .bearer_auth(request.api_key.expose_secret())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status_code = response.status().as_u16();
        let response_text = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Ok(RawResponse {
            status_code,
            response_text,
        })
    }
}
