use crate::domain::order::{CheckoutRedirect, OrderRequest};
use crate::domain::ports::{CheckoutInitiator, PaymentVerifier};
use crate::domain::verification::{OrderId, VerificationResponse};
use crate::error::{CheckoutError, VerificationError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A verifier answering from a table of scripted responses.
///
/// Uses `Arc<RwLock<..>>` so a clone can be handed to the resolver while the
/// test keeps another one to script answers and count calls. Unknown orders
/// answer with HTTP 404.
#[derive(Default, Clone)]
pub struct InMemoryPaymentVerifier {
    responses: Arc<RwLock<HashMap<String, VerificationResponse>>>,
    calls: Arc<RwLock<usize>>,
}

impl InMemoryPaymentVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer for `order_id`, replacing any previous one.
    pub async fn respond(&self, order_id: &str, response: VerificationResponse) {
        let mut responses = self.responses.write().await;
        responses.insert(order_id.to_string(), response);
    }

    /// Number of verification calls received so far.
    pub async fn calls(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl PaymentVerifier for InMemoryPaymentVerifier {
    async fn verify(&self, order_id: &OrderId) -> VerificationResponse {
        *self.calls.write().await += 1;
        let responses = self.responses.read().await;
        responses.get(order_id.as_str()).cloned().unwrap_or_else(|| {
            Err(VerificationError::Status {
                status: 404,
                error: Some("order not found".to_string()),
            })
        })
    }
}

/// A checkout initiator that records every order it receives.
///
/// Succeeds with a redirect derived from the request count unless told to fail.
#[derive(Default, Clone)]
pub struct InMemoryCheckoutInitiator {
    requests: Arc<RwLock<Vec<OrderRequest>>>,
    failure: Arc<RwLock<Option<CheckoutError>>>,
}

impl InMemoryCheckoutInitiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with `error`.
    pub async fn fail_with(&self, error: CheckoutError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn succeed(&self) {
        *self.failure.write().await = None;
    }

    pub async fn requests(&self) -> Vec<OrderRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl CheckoutInitiator for InMemoryCheckoutInitiator {
    async fn initiate(&self, order: &OrderRequest) -> Result<CheckoutRedirect, CheckoutError> {
        let mut requests = self.requests.write().await;
        requests.push(order.clone());
        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }
        let order_id = format!("order-{}", requests.len());
        Ok(CheckoutRedirect {
            form_url: format!("https://pay.example/form?mdOrder={order_id}"),
            order_number: format!("SG-{:08}", requests.len()),
            order_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nominal::Nominal;
    use crate::domain::verification::VerificationResult;

    #[tokio::test]
    async fn test_in_memory_verifier_scripted_and_unknown() {
        let verifier = InMemoryPaymentVerifier::new();
        verifier
            .respond("known", Ok(VerificationResult::default()))
            .await;

        let known = verifier.verify(&OrderId::new("known").unwrap()).await;
        assert_eq!(known, Ok(VerificationResult::default()));

        let unknown = verifier.verify(&OrderId::new("other").unwrap()).await;
        assert!(matches!(
            unknown,
            Err(VerificationError::Status { status: 404, .. })
        ));
        assert_eq!(verifier.calls().await, 2);
    }

    #[tokio::test]
    async fn test_in_memory_checkout_records_failures_too() {
        let checkout = InMemoryCheckoutInitiator::new();
        let order = OrderRequest {
            nominal: Nominal::new(1000).unwrap(),
            recipient_name: "Anna".to_string(),
            sender_name: String::new(),
            return_url: "https://shop.example/payment-return".to_string(),
        };

        let redirect = checkout.initiate(&order).await.unwrap();
        assert_eq!(redirect.order_id, "order-1");

        checkout
            .fail_with(CheckoutError::Transport("offline".to_string()))
            .await;
        assert!(checkout.initiate(&order).await.is_err());

        checkout.succeed().await;
        let redirect = checkout.initiate(&order).await.unwrap();
        assert_eq!(redirect.order_id, "order-3");
        assert_eq!(checkout.requests().await.len(), 3);
    }
}
