use super::certificate::CertificateRecord;
use crate::error::{GiftError, VerificationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

pub const MISSING_ORDER_ID: &str = "missing order id";
pub const TRANSPORT_FAILURE: &str = "could not verify payment status";
pub const VERIFICATION_FAILED: &str = "payment verification error";
pub const NOT_COMPLETED: &str = "payment not completed";

/// Opaque token correlating a checkout session with its payment outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Result<Self, GiftError> {
        let value = value.into();
        if value.is_empty() {
            Err(GiftError::ValidationError(
                "Order id must not be empty".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrderId {
    type Error = GiftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a reachable verification service response.
///
/// Unknown fields (`orderStatus`, `statusText`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerificationResult {
    pub paid: bool,
    pub certificate: Option<CertificateRecord>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl VerificationResult {
    /// Reads a parsed response body.
    ///
    /// Only `"paid": true` counts as paid, `error` and `message` are kept
    /// when they are strings, and a non-null `certificate` is kept verbatim.
    /// A non-object body carries none of these fields. A `null` body cannot be
    /// read at all and yields `None`.
    pub fn from_json(body: &Value) -> Option<Self> {
        match body {
            Value::Null => None,
            Value::Object(fields) => Some(Self {
                paid: matches!(fields.get("paid"), Some(Value::Bool(true))),
                certificate: fields
                    .get("certificate")
                    .filter(|v| !v.is_null())
                    .cloned()
                    .map(CertificateRecord::new),
                error: string_field(fields, "error"),
                message: string_field(fields, "message"),
            }),
            _ => Some(Self::default()),
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// What a single verification call produced.
pub type VerificationResponse = Result<VerificationResult, VerificationError>;

/// Display state of the payment-return page.
///
/// Created as `Loading`, moves to exactly one of the other variants and stays there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolverState {
    Loading,
    Success { certificate: CertificateRecord },
    NotPaid { message: String },
    Error { message: String },
}

impl ResolverState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn certificate(&self) -> Option<&CertificateRecord> {
        match self {
            Self::Success { certificate } => Some(certificate),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotPaid { message } | Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Empty strings carry no information and fall through to the generic text.
fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

struct Rule {
    name: &'static str,
    apply: fn(&VerificationResponse) -> Option<ResolverState>,
}

/// Classification rules, evaluated in order; the first one that applies wins.
/// A response no rule applies to was not completed.
const RULES: [Rule; 4] = [
    Rule {
        name: "transport_failure",
        apply: transport_failure,
    },
    Rule {
        name: "http_failure",
        apply: http_failure,
    },
    Rule {
        name: "paid_with_certificate",
        apply: paid_with_certificate,
    },
    Rule {
        name: "paid_but_not_issued",
        apply: paid_but_not_issued,
    },
];

fn transport_failure(response: &VerificationResponse) -> Option<ResolverState> {
    match response {
        Err(VerificationError::Transport(_)) => Some(ResolverState::error(TRANSPORT_FAILURE)),
        _ => None,
    }
}

fn http_failure(response: &VerificationResponse) -> Option<ResolverState> {
    match response {
        Err(VerificationError::Status { error, .. }) => Some(ResolverState::error(
            non_empty(error).unwrap_or(VERIFICATION_FAILED),
        )),
        _ => None,
    }
}

fn paid_with_certificate(response: &VerificationResponse) -> Option<ResolverState> {
    match response {
        Ok(VerificationResult {
            paid: true,
            certificate: Some(certificate),
            ..
        }) if certificate.is_present() => Some(ResolverState::Success {
            certificate: certificate.clone(),
        }),
        _ => None,
    }
}

// Payment went through but issuance failed: retrying the payment is not the fix.
fn paid_but_not_issued(response: &VerificationResponse) -> Option<ResolverState> {
    match response {
        Ok(result @ VerificationResult { paid: true, .. }) => {
            non_empty(&result.error).map(ResolverState::error)
        }
        _ => None,
    }
}

fn not_completed(response: &VerificationResponse) -> ResolverState {
    let message = match response {
        Ok(result) => non_empty(&result.message),
        Err(_) => None,
    };
    ResolverState::NotPaid {
        message: message.unwrap_or(NOT_COMPLETED).to_string(),
    }
}

/// Maps one verification response to its terminal display state.
pub fn classify(response: &VerificationResponse) -> ResolverState {
    RULES
        .iter()
        .find_map(|rule| {
            let state = (rule.apply)(response)?;
            debug!(rule = rule.name, "Verification response classified");
            Some(state)
        })
        .unwrap_or_else(|| {
            debug!(rule = "not_completed", "Verification response classified");
            not_completed(response)
        })
}
