#![allow(dead_code)]

use giftcert::domain::certificate::CertificateRecord;

pub fn sample_certificate() -> CertificateRecord {
    CertificateRecord::new(serde_json::json!({
        "clientId": "1048576",
        "cardNumber": "2700000123456",
        "cardBarcode": "2700000123456",
        "cardHash": "f3a9c2",
        "recipientName": "Anna Petrova",
        "senderName": "Olga",
        "nominal": 5000,
        "qrUrl": "2700000123456",
    }))
}
