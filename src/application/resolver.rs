use crate::domain::ports::PaymentVerifierBox;
use crate::domain::verification::{MISSING_ORDER_ID, OrderId, ResolverState, classify};
use tracing::{info, warn};

/// Where the buyer should be sent when they leave the payment-return page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// A brand-new purchase wizard session.
    StartOver,
}

/// Turns the order id from the payment return into one terminal display state.
///
/// One resolver corresponds to one mount of the payment-return page. It issues
/// at most one verification call, never retries and enforces no timeout. Once
/// a terminal state is reached it never changes; checking again requires
/// mounting a new resolver.
pub struct PaymentResolver {
    verifier: PaymentVerifierBox,
    order_id: Option<OrderId>,
    state: ResolverState,
    issued: bool,
}

impl PaymentResolver {
    /// Mounts a resolver for `order_id`.
    ///
    /// Without an order id the resolver is immediately in the error state and
    /// will never call the verifier.
    pub fn mount(verifier: PaymentVerifierBox, order_id: Option<OrderId>) -> Self {
        let state = match order_id {
            Some(_) => ResolverState::Loading,
            None => {
                warn!("Payment return without an order id");
                ResolverState::error(MISSING_ORDER_ID)
            }
        };
        Self {
            verifier,
            order_id,
            state,
            issued: false,
        }
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    /// Performs the verification call if it has not been issued yet.
    ///
    /// Later calls return the stored state. If the first call was dropped
    /// before completing, the state stays `Loading` and no second call is made.
    pub async fn resolve(&mut self) -> &ResolverState {
        if self.issued || self.state.is_terminal() {
            return &self.state;
        }
        let Some(order_id) = self.order_id.as_ref() else {
            return &self.state;
        };

        self.issued = true;
        let response = self.verifier.verify(order_id).await;
        let state = classify(&response);
        info!(order_id = %order_id, state = ?StateKind::of(&state), "Payment resolved");
        self.state = state;
        &self.state
    }

    /// The single recovery action offered on every terminal page.
    pub fn restart(&self) -> Navigation {
        Navigation::StartOver
    }

    pub fn into_state(self) -> ResolverState {
        self.state
    }
}

// Logs the outcome without the certificate payload.
#[derive(Debug)]
enum StateKind {
    Loading,
    Success,
    NotPaid,
    Error,
}

impl StateKind {
    fn of(state: &ResolverState) -> Self {
        match state {
            ResolverState::Loading => Self::Loading,
            ResolverState::Success { .. } => Self::Success,
            ResolverState::NotPaid { .. } => Self::NotPaid,
            ResolverState::Error { .. } => Self::Error,
        }
    }
}
