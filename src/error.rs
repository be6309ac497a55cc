use thiserror::Error;

/// Failure to hand an order to the checkout initiator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    #[error("Checkout transport error: {0}")]
    Transport(String),
    #[error("Checkout rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Failure to obtain a usable verification response.
///
/// A response that arrived with a parsable body is never an error here,
/// regardless of `paid`; those cases are classified by the resolver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerificationError {
    #[error("Verification transport error: {0}")]
    Transport(String),
    #[error("Verification service returned {status}")]
    Status { status: u16, error: Option<String> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("{0} is not set")]
    Missing(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Error, Debug)]
pub enum GiftError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, GiftError>;
