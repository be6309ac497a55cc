use crate::error::GiftError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;

/// Smallest face value a certificate can be bought for.
pub const MIN_NOMINAL: u64 = 500;

/// Face values offered as one-click buttons.
pub const PRESET_NOMINALS: [u64; 6] = [1000, 2000, 3000, 5000, 7000, 10000];

/// The face value of a certificate, in whole currency units.
///
/// A `Nominal` is always at least [`MIN_NOMINAL`]; the raw, possibly invalid
/// value the buyer is typing lives in [`AmountInput`] until it is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Nominal(u64);

impl Nominal {
    pub fn new(value: u64) -> Result<Self, GiftError> {
        if value >= MIN_NOMINAL {
            Ok(Self(value))
        } else {
            Err(GiftError::ValidationError(format!(
                "Nominal must be at least {MIN_NOMINAL}"
            )))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Nominal {
    type Error = GiftError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nominal> for u64 {
    fn from(nominal: Nominal) -> Self {
        nominal.0
    }
}

// Digits grouped by thousands with a space, the way prices are shown to buyers.
impl fmt::Display for Nominal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        f.write_str(&grouped)
    }
}

/// Text of the free-form amount field, reduced to ASCII digits.
///
/// Only [`CustomAmount::parse`] builds one, so it never holds anything else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomAmount(String);

impl CustomAmount {
    /// Keeps the digits of `raw` and drops everything else.
    pub fn parse(raw: &str) -> Self {
        Self(raw.chars().filter(char::is_ascii_digit).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The typed amount, 0 for an empty field.
    ///
    /// Digit strings beyond `u64` saturate to `u64::MAX`.
    pub fn value(&self) -> u64 {
        match self.0.parse::<u64>() {
            Ok(value) => value,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
            Err(_) => 0,
        }
    }
}

/// How the buyer expressed the amount: one of the preset buttons or the
/// free-text field. Only one can be active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AmountInput {
    #[default]
    None,
    Preset(u64),
    Custom(CustomAmount),
}

impl AmountInput {
    /// Builds a custom amount, discarding every non-digit character.
    pub fn custom(raw: &str) -> Self {
        Self::Custom(CustomAmount::parse(raw))
    }

    /// The amount currently expressed, 0 when nothing usable was entered.
    pub fn amount(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::Preset(value) => *value,
            Self::Custom(custom) => custom.value(),
        }
    }

    pub fn preset(&self) -> Option<u64> {
        match self {
            Self::Preset(value) => Some(*value),
            _ => None,
        }
    }

    /// The custom text field contents, empty unless the custom mode is active.
    pub fn custom_text(&self) -> &str {
        match self {
            Self::Custom(custom) => custom.as_str(),
            _ => "",
        }
    }
}
