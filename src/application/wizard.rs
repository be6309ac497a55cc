use crate::domain::nominal::{AmountInput, MIN_NOMINAL, Nominal};
use crate::domain::order::{CheckoutRedirect, Notice, OrderRequest, Step};
use crate::domain::ports::CheckoutInitiatorBox;
use crate::error::{CheckoutError, Result};
use tracing::{debug, info, warn};
use url::Url;

/// What a call to [`PurchaseWizard::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// The action was disabled; nothing changed.
    Stayed,
    MovedTo(Step),
    /// Checkout accepted the order; the buyer should be sent to the provider.
    Redirect(CheckoutRedirect),
    /// Checkout failed; the buyer may retry manually.
    Failed(Notice),
}

/// Three-step purchase wizard: amount, recipient, payment.
///
/// Forward moves are gated on the validity of every step before the target;
/// backward moves are free. Invalid forward moves are silent no-ops, the way a
/// disabled button behaves.
pub struct PurchaseWizard {
    checkout: CheckoutInitiatorBox,
    return_url: Url,
    step: Step,
    amount: AmountInput,
    recipient_name: String,
    sender_name: String,
    is_submitting: bool,
}

impl PurchaseWizard {
    /// Creates a wizard at step 1 with an empty draft.
    ///
    /// # Arguments
    ///
    /// * `checkout` - Where confirmed orders are sent.
    /// * `return_url` - The payment-return page the provider redirects back to.
    pub fn new(checkout: CheckoutInitiatorBox, return_url: Url) -> Self {
        Self {
            checkout,
            return_url,
            step: Step::default(),
            amount: AmountInput::None,
            recipient_name: String::new(),
            sender_name: String::new(),
            is_submitting: false,
        }
    }

    pub fn select_preset_amount(&mut self, value: u64) {
        self.amount = AmountInput::Preset(value);
    }

    /// Keeps only the digits of `raw`; unsets any preset.
    pub fn enter_custom_amount(&mut self, raw: &str) {
        self.amount = AmountInput::custom(raw);
    }

    pub fn set_recipient_name(&mut self, name: impl Into<String>) {
        self.recipient_name = name.into();
    }

    pub fn set_sender_name(&mut self, name: impl Into<String>) {
        self.sender_name = name.into();
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn amount_input(&self) -> &AmountInput {
        &self.amount
    }

    pub fn nominal(&self) -> u64 {
        self.amount.amount()
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_amount_valid(&self) -> bool {
        self.nominal() >= MIN_NOMINAL
    }

    pub fn is_recipient_valid(&self) -> bool {
        !self.recipient_name.trim().is_empty()
    }

    /// The furthest step the draft currently qualifies for.
    pub fn max_reachable_step(&self) -> Step {
        if !self.is_amount_valid() {
            Step::Amount
        } else if !self.is_recipient_valid() {
            Step::Recipient
        } else {
            Step::Payment
        }
    }

    /// Whether the forward action of the current step is enabled.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Amount => self.is_amount_valid(),
            Step::Recipient => self.is_recipient_valid(),
            Step::Payment => !self.is_submitting,
        }
    }

    /// Moves to the next step, or confirms the purchase from the last one.
    pub async fn advance(&mut self) -> WizardEvent {
        if !self.can_advance() {
            debug!(step = %self.step, "Advance blocked");
            return WizardEvent::Stayed;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                WizardEvent::MovedTo(next)
            }
            None => self.confirm_purchase().await,
        }
    }

    /// Goes back one step; does nothing on step 1.
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Jumps straight to `target` if the draft qualifies for it.
    ///
    /// Returns whether the jump happened.
    pub fn jump_to_step(&mut self, target: Step) -> bool {
        if target > self.max_reachable_step() {
            debug!(target = %target, "Jump blocked");
            return false;
        }
        self.step = target;
        true
    }

    /// Freezes the current draft into the request sent to checkout.
    pub fn order_request(&self) -> Result<OrderRequest> {
        Ok(OrderRequest {
            nominal: Nominal::new(self.nominal())?,
            recipient_name: self.recipient_name.clone(),
            sender_name: self.sender_name.trim().to_string(),
            return_url: self.return_url.to_string(),
        })
    }

    /// Hands the frozen draft to checkout.
    ///
    /// On success `is_submitting` stays set: the buyer is leaving for the
    /// provider. On failure it is cleared so the button can be pressed again.
    pub async fn confirm_purchase(&mut self) -> WizardEvent {
        if self.is_submitting || !self.is_recipient_valid() {
            return WizardEvent::Stayed;
        }
        let Ok(order) = self.order_request() else {
            return WizardEvent::Stayed;
        };

        self.is_submitting = true;
        match self.checkout.initiate(&order).await {
            Ok(redirect) => {
                info!(
                    order_id = %redirect.order_id,
                    order_number = %redirect.order_number,
                    nominal = order.nominal.value(),
                    "Checkout initiated"
                );
                WizardEvent::Redirect(redirect)
            }
            Err(e) => {
                warn!(error = %e, "Checkout initiation failed");
                self.is_submitting = false;
                WizardEvent::Failed(checkout_notice(&e))
            }
        }
    }
}

fn checkout_notice(error: &CheckoutError) -> Notice {
    let description = match error {
        CheckoutError::Transport(_) => "Check your connection and try again".to_string(),
        CheckoutError::Rejected { message, .. } => message.clone(),
    };
    Notice {
        title: "Payment could not be started".to_string(),
        description,
    }
}
