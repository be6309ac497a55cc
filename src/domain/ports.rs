use super::order::{CheckoutRedirect, OrderRequest};
use super::verification::{OrderId, VerificationResponse};
use crate::error::CheckoutError;
use async_trait::async_trait;

/// Registers an order with the payment provider.
///
/// Must be safe to call again after a failure.
#[async_trait]
pub trait CheckoutInitiator: Send + Sync {
    async fn initiate(&self, order: &OrderRequest) -> Result<CheckoutRedirect, CheckoutError>;
}

/// Asks whether an order has been paid for (and its certificate issued).
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    async fn verify(&self, order_id: &OrderId) -> VerificationResponse;
}

pub type CheckoutInitiatorBox = Box<dyn CheckoutInitiator>;
pub type PaymentVerifierBox = Box<dyn PaymentVerifier>;
