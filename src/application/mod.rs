//! Application layer containing the two state machines of the purchase flow.
//!
//! `PurchaseWizard` collects and validates the order across three steps and
//! hands it to checkout. `PaymentResolver` turns the provider's return into a
//! single terminal display state. The two never share state.

pub mod resolver;
pub mod wizard;
