use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An issued certificate as returned by the issuance system.
///
/// Display data only: the payload is kept exactly as received, including
/// `null` fields and keys this crate does not know about, and is forwarded
/// to the rendering layer unchanged. The accessors read the documented
/// fields leniently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateRecord(Value);

impl CertificateRecord {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn client_id(&self) -> Option<String> {
        self.text("clientId")
    }

    pub fn card_number(&self) -> Option<String> {
        self.text("cardNumber")
    }

    pub fn card_barcode(&self) -> Option<String> {
        self.text("cardBarcode")
    }

    pub fn card_hash(&self) -> Option<String> {
        self.text("cardHash")
    }

    pub fn recipient_name(&self) -> Option<String> {
        self.text("recipientName")
    }

    pub fn sender_name(&self) -> Option<String> {
        self.text("senderName")
    }

    pub fn qr_url(&self) -> Option<String> {
        self.text("qrUrl")
    }

    /// The face value, accepting `5000` as well as `5000.0`.
    pub fn nominal(&self) -> Option<u64> {
        let number = self.0.get("nominal")?.as_number()?;
        number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
    }

    /// Whether the payload counts as "a certificate was returned": anything
    /// except `false`, `0`, an empty string or `null`.
    pub(crate) fn is_present(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
