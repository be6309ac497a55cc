//! Endpoint configuration.
//!
//! Only the verification endpoint has a built-in default. The checkout
//! endpoint and the return page are deployment-specific and must be given
//! through environment variables or explicit construction.

use crate::error::ConfigError;
use url::Url;

pub const DEFAULT_CHECK_PAYMENT_URL: &str =
    "https://functions.poehali.dev/ff05838a-d8e7-43a7-9b9e-006f28780541";

pub const CHECK_PAYMENT_URL_VAR: &str = "GIFTCERT_CHECK_PAYMENT_URL";
pub const CREATE_PAYMENT_URL_VAR: &str = "GIFTCERT_CREATE_PAYMENT_URL";
pub const RETURN_URL_VAR: &str = "GIFTCERT_RETURN_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Payment verification service.
    pub check_payment_url: Url,
    /// Checkout initiator.
    pub create_payment_url: Option<Url>,
    /// Payment-return page the provider redirects the buyer to.
    pub return_url: Option<Url>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GIFTCERT_CHECK_PAYMENT_URL` (default: the production check-payment function)
    /// - `GIFTCERT_CREATE_PAYMENT_URL`
    /// - `GIFTCERT_RETURN_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let check_payment_url = match std::env::var(CHECK_PAYMENT_URL_VAR) {
            Ok(raw) => parse_url(CHECK_PAYMENT_URL_VAR, &raw)?,
            Err(_) => parse_url(CHECK_PAYMENT_URL_VAR, DEFAULT_CHECK_PAYMENT_URL)?,
        };
        Ok(Self {
            check_payment_url,
            create_payment_url: optional_env_url(CREATE_PAYMENT_URL_VAR)?,
            return_url: optional_env_url(RETURN_URL_VAR)?,
        })
    }

    /// Replaces each endpoint for which an override is given.
    pub fn with_overrides(
        mut self,
        check_payment_url: Option<&str>,
        create_payment_url: Option<&str>,
        return_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = check_payment_url {
            self.check_payment_url = parse_url(CHECK_PAYMENT_URL_VAR, raw)?;
        }
        if let Some(raw) = create_payment_url {
            self.create_payment_url = Some(parse_url(CREATE_PAYMENT_URL_VAR, raw)?);
        }
        if let Some(raw) = return_url {
            self.return_url = Some(parse_url(RETURN_URL_VAR, raw)?);
        }
        Ok(self)
    }

    pub fn require_create_payment_url(&self) -> Result<&Url, ConfigError> {
        self.create_payment_url
            .as_ref()
            .ok_or_else(|| ConfigError::Missing(CREATE_PAYMENT_URL_VAR.to_string()))
    }

    pub fn require_return_url(&self) -> Result<&Url, ConfigError> {
        self.return_url
            .as_ref()
            .ok_or_else(|| ConfigError::Missing(RETURN_URL_VAR.to_string()))
    }
}

pub fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

fn optional_env_url(var: &str) -> Result<Option<Url>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.is_empty() => parse_url(var, &raw).map(Some),
        _ => Ok(None),
    }
}
