//! Contract tests for the HTTP adapters against a mock endpoint.

mod common;

use giftcert::domain::nominal::Nominal;
use giftcert::domain::order::OrderRequest;
use giftcert::domain::ports::{CheckoutInitiator, PaymentVerifier};
use giftcert::domain::verification::{
    OrderId, ResolverState, TRANSPORT_FAILURE, VERIFICATION_FAILED, classify,
};
use giftcert::error::{CheckoutError, VerificationError};
use giftcert::infrastructure::http::{HttpCheckoutInitiator, HttpPaymentVerifier};
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verifier(server: &MockServer) -> HttpPaymentVerifier {
    HttpPaymentVerifier::new(server.uri().parse().unwrap()).unwrap()
}

fn order_id(id: &str) -> OrderId {
    OrderId::new(id).unwrap()
}

// ── Payment verification ─────────────────────────────────────────────

#[tokio::test]
async fn verify_posts_order_id_and_parses_certificate() {
    let server = MockServer::start().await;
    let certificate = common::sample_certificate();

    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "orderId": "ord-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "paid": true,
            "success": true,
            "certificate": certificate,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = verifier(&server).verify(&order_id("ord-1")).await;
    assert_eq!(classify(&response), ResolverState::Success { certificate });
}

#[tokio::test]
async fn verify_forwards_imperfect_certificate_as_success() {
    let server = MockServer::start().await;
    let payload = serde_json::json!({
        "clientId": "1048576",
        "cardNumber": "2700000123456",
        "cardBarcode": "2700000123456",
        "cardHash": null,
        "recipientName": "Anna Petrova",
        "senderName": "",
        "nominal": 5000.0,
        "qrUrl": "2700000123456",
        "templateId": 15852,
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "paid": true,
            "certificate": payload.clone(),
        })))
        .mount(&server)
        .await;

    let response = verifier(&server).verify(&order_id("ord-1b")).await;
    let state = classify(&response);
    let certificate = state.certificate().expect("paid and issued is a success");
    assert_eq!(certificate.as_value(), &payload);
    assert_eq!(certificate.card_hash(), None);
    assert_eq!(certificate.nominal(), Some(5000));
}

#[tokio::test]
async fn verify_ignores_extra_status_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "paid": false,
            "orderStatus": 0,
            "statusText": "registered",
            "actionCodeDescription": "",
        })))
        .mount(&server)
        .await;

    let result = verifier(&server).verify(&order_id("ord-2")).await.unwrap();
    assert!(!result.paid);
    assert!(result.certificate.is_none());
}

#[tokio::test]
async fn verify_maps_error_status_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_json(serde_json::json!({ "paid": true, "error": "issuer unavailable" })),
        )
        .mount(&server)
        .await;

    let response = verifier(&server).verify(&order_id("ord-3")).await;
    assert_eq!(
        response,
        Err(VerificationError::Status {
            status: 502,
            error: Some("issuer unavailable".to_string()),
        })
    );
    assert_eq!(classify(&response).message(), Some("issuer unavailable"));
}

#[tokio::test]
async fn verify_maps_error_status_with_non_object_json_body() {
    for body in [
        serde_json::json!("Service Unavailable"),
        serde_json::json!([]),
        serde_json::json!(null),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let response = verifier(&server).verify(&order_id("ord-3b")).await;
        assert_eq!(
            response,
            Err(VerificationError::Status {
                status: 503,
                error: None,
            }),
            "body {body}"
        );
        assert_eq!(classify(&response).message(), Some(VERIFICATION_FAILED));
    }
}

#[tokio::test]
async fn verify_treats_null_success_body_as_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let response = verifier(&server).verify(&order_id("ord-3c")).await;
    assert_eq!(classify(&response).message(), Some(TRANSPORT_FAILURE));
}

#[tokio::test]
async fn verify_treats_non_json_body_as_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let response = verifier(&server).verify(&order_id("ord-4")).await;
    assert!(matches!(response, Err(VerificationError::Transport(_))));
}

#[tokio::test]
async fn verify_reports_unreachable_service() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let verifier = HttpPaymentVerifier::new(uri.parse().unwrap()).unwrap();
    let response = verifier.verify(&order_id("ord-5")).await;
    assert!(matches!(response, Err(VerificationError::Transport(_))));
}

// ── Checkout initiation ──────────────────────────────────────────────

fn order() -> OrderRequest {
    OrderRequest {
        nominal: Nominal::new(3000).unwrap(),
        recipient_name: "Anna Petrova".to_string(),
        sender_name: "Olga".to_string(),
        return_url: "https://shop.example/payment-return".to_string(),
    }
}

#[tokio::test]
async fn initiate_sends_order_and_returns_form_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({
            "nominal": 3000,
            "recipientName": "Anna Petrova",
            "senderName": "Olga",
            "returnUrl": "https://shop.example/payment-return",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": "70906e55-7114",
            "formUrl": "https://pay.example/payment/merchants/form?mdOrder=70906e55-7114",
            "orderNumber": "SG-0a1b2c3d4e5f",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let checkout = HttpCheckoutInitiator::new(server.uri().parse().unwrap()).unwrap();
    let redirect = checkout.initiate(&order()).await.unwrap();
    assert_eq!(redirect.order_id, "70906e55-7114");
    assert_eq!(redirect.order_number, "SG-0a1b2c3d4e5f");
}

#[tokio::test]
async fn initiate_surfaces_rejection_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_json(serde_json::json!({
            "error": "Payment registration failed",
            "details": "Access denied",
        })))
        .mount(&server)
        .await;

    let checkout = HttpCheckoutInitiator::new(server.uri().parse().unwrap()).unwrap();
    let err = checkout.initiate(&order()).await.unwrap_err();
    assert_eq!(
        err,
        CheckoutError::Rejected {
            status: 502,
            message: "Payment registration failed: Access denied".to_string(),
        }
    );
}

#[tokio::test]
async fn initiate_rejects_empty_form_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": "",
            "formUrl": "",
            "orderNumber": "SG-000000000000",
        })))
        .mount(&server)
        .await;

    let checkout = HttpCheckoutInitiator::new(server.uri().parse().unwrap()).unwrap();
    let err = checkout.initiate(&order()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Rejected { status: 200, .. }));
}
