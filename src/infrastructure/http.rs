//! HTTP adapters for the checkout and verification endpoints.
//!
//! Both endpoints take a JSON body via POST. A non-2xx status carries an
//! optional `{"error": ...}` body. A body that is not JSON at all is treated
//! as a transport failure whatever the status; any valid JSON body is read.
//! Neither adapter sets a request timeout or retries; that policy belongs to
//! the caller.

use crate::domain::order::{CheckoutRedirect, OrderRequest};
use crate::domain::ports::{CheckoutInitiator, PaymentVerifier};
use crate::domain::verification::{OrderId, VerificationResponse, VerificationResult};
use crate::error::{CheckoutError, ConfigError, VerificationError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

fn build_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Sends the request and returns the status with the raw body text.
async fn post_json<T: serde::Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &Url,
    body: &T,
) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
    let response = client.post(url.clone()).json(body).send().await?;
    let status = response.status();
    let text = response.text().await?;
    Ok((status, text))
}

/// Payment verification over HTTP: `POST {"orderId": ...}`.
#[derive(Debug, Clone)]
pub struct HttpPaymentVerifier {
    client: reqwest::Client,
    url: Url,
}

impl HttpPaymentVerifier {
    pub fn new(url: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client()?,
            url,
        })
    }
}

#[async_trait]
impl PaymentVerifier for HttpPaymentVerifier {
    async fn verify(&self, order_id: &OrderId) -> VerificationResponse {
        debug!(url = %self.url, order_id = %order_id, "Verifying payment");
        let request = serde_json::json!({ "orderId": order_id.as_str() });
        let (status, body) = post_json(&self.client, &self.url, &request)
            .await
            .map_err(|e| {
                warn!(error = %e, "Verification request failed");
                VerificationError::Transport(e.to_string())
            })?;

        let body: Value = serde_json::from_str(&body).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Verification body is not valid JSON");
            VerificationError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            return Err(VerificationError::Status {
                status: status.as_u16(),
                error: body.get("error").and_then(Value::as_str).map(str::to_string),
            });
        }

        let result = VerificationResult::from_json(&body).ok_or_else(|| {
            warn!("Verification body is null");
            VerificationError::Transport("verification response body is null".to_string())
        })?;
        debug!(paid = result.paid, "Verification response received");
        Ok(result)
    }
}

/// Checkout initiation over HTTP: posts the order, receives the provider form URL.
#[derive(Debug, Clone)]
pub struct HttpCheckoutInitiator {
    client: reqwest::Client,
    url: Url,
}

impl HttpCheckoutInitiator {
    pub fn new(url: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client()?,
            url,
        })
    }
}

#[async_trait]
impl CheckoutInitiator for HttpCheckoutInitiator {
    async fn initiate(&self, order: &OrderRequest) -> Result<CheckoutRedirect, CheckoutError> {
        debug!(url = %self.url, nominal = order.nominal.value(), "Initiating checkout");
        let (status, body) = post_json(&self.client, &self.url, order)
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error_body: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = match (error_body.error, error_body.details) {
                (Some(error), Some(details)) if !details.is_empty() => {
                    format!("{error}: {details}")
                }
                (Some(error), _) => error,
                (None, _) => format!("checkout endpoint returned {status}"),
            };
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let redirect: CheckoutRedirect =
            serde_json::from_str(&body).map_err(|e| CheckoutError::Transport(e.to_string()))?;
        if redirect.form_url.is_empty() {
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                message: "payment provider returned no form URL".to_string(),
            });
        }
        Ok(redirect)
    }
}
