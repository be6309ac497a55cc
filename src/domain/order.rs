use super::nominal::Nominal;
use crate::error::GiftError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three ordered steps of the purchase wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    Amount = 1,
    Recipient = 2,
    Payment = 3,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Amount => Some(Self::Recipient),
            Self::Recipient => Some(Self::Payment),
            Self::Payment => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Amount => None,
            Self::Recipient => Some(Self::Amount),
            Self::Payment => Some(Self::Recipient),
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = GiftError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Amount),
            2 => Ok(Self::Recipient),
            3 => Ok(Self::Payment),
            other => Err(GiftError::ValidationError(format!(
                "No such wizard step: {other}"
            ))),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A confirmed, frozen order as sent to the checkout initiator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub nominal: Nominal,
    pub recipient_name: String,
    pub sender_name: String,
    /// Where the payment provider sends the buyer back to.
    pub return_url: String,
}

/// Successful checkout initiation: the buyer should be sent to `form_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirect {
    pub order_id: String,
    pub form_url: String,
    #[serde(default)]
    pub order_number: String,
}

/// A user-visible message, shown instead of raising an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
