//! End-to-end tests against a mocked Payconiq API.

use payconiq::{PayconiqClient, PayconiqConfig, PayconiqError, DEFAULT_CURRENCY};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn v3_client(server: &MockServer) -> PayconiqClient {
    let mut config = PayconiqConfig::v3("access-token");
    config.endpoint = server.uri();
    PayconiqClient::new(config).expect("client construction")
}

async fn v2_client(server: &MockServer) -> PayconiqClient {
    let mut config = PayconiqConfig::v2("access-token");
    config.endpoint = server.uri();
    PayconiqClient::new(config).expect("client construction")
}

#[tokio::test]
async fn create_payment_returns_provider_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(header("Authorization", "access-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "amount": 1000,
            "currency": "EUR",
            "reference": "order-42",
            "callbackUrl": "https://merchant.example/cb",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"paymentId": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let payment_id = client
        .create_payment(1000, DEFAULT_CURRENCY, Some("order-42"), "https://merchant.example/cb")
        .await
        .unwrap();

    assert_eq!(payment_id, "abc123");
}

#[tokio::test]
async fn create_payment_rejection_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "invalid currency"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let err = client
        .create_payment(1000, "XXX", None, "https://merchant.example/cb")
        .await
        .unwrap_err();

    match err {
        PayconiqError::CreatePaymentFailed { message } => {
            assert_eq!(message.as_deref(), Some("invalid currency"));
        }
        other => panic!("expected CreatePaymentFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn create_payment_rejection_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let err = client
        .create_payment(500, DEFAULT_CURRENCY, None, "https://merchant.example/cb")
        .await
        .unwrap_err();

    match err {
        PayconiqError::CreatePaymentFailed { message } => assert!(message.is_none()),
        other => panic!("expected CreatePaymentFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_payment_id_counts_as_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paymentId": ""})))
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let err = client
        .create_payment(500, DEFAULT_CURRENCY, None, "https://merchant.example/cb")
        .await
        .unwrap_err();

    assert!(matches!(err, PayconiqError::CreatePaymentFailed { .. }));
}

#[tokio::test]
async fn get_payment_details_returns_response_verbatim() {
    let body = json!({
        "paymentId": "abc123",
        "status": "SUCCEEDED",
        "amount": 1000,
        "currency": "EUR",
    });

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/abc123"))
        .and(header("Authorization", "access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let details = client.get_payment_details("abc123").await.unwrap();

    assert_eq!(serde_json::to_value(&details).unwrap(), body);
    assert_eq!(details.get("status"), Some(&json!("SUCCEEDED")));
}

#[tokio::test]
async fn get_payment_details_rejection_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "unknown payment"})),
        )
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let err = client.get_payment_details("nope").await.unwrap_err();

    match err {
        PayconiqError::GetPaymentDetailsFailed { message } => {
            assert_eq!(message.as_deref(), Some("unknown payment"));
        }
        other => panic!("expected GetPaymentDetailsFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn v2_create_targets_transactions_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(body_json(json!({
            "amount": 250,
            "currency": "EUR",
            "callbackUrl": "https://merchant.example/cb",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"transactionId": "tx-9"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = v2_client(&server).await;
    #[allow(deprecated)]
    let transaction_id = client
        .create_transaction(250, DEFAULT_CURRENCY, "https://merchant.example/cb")
        .await
        .unwrap();

    assert_eq!(transaction_id, "tx-9");
}

#[tokio::test]
async fn v2_retrieve_accepts_oldest_id_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions/tx-9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"_id": "tx-9", "status": "SUCCEEDED"})),
        )
        .mount(&server)
        .await;

    let client = v2_client(&server).await;
    #[allow(deprecated)]
    let details = client.retrieve_transaction("tx-9").await.unwrap();

    assert_eq!(details.get("_id"), Some(&json!("tx-9")));
}

#[tokio::test]
async fn transitional_create_accepts_payment_id_field() {
    // v3-transitional integrators still call create_transaction against the
    // /payments surface, which answers with paymentId; the legacy markers
    // must accept it.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"paymentId": "abc123"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    #[allow(deprecated)]
    let transaction_id = client
        .create_transaction(250, DEFAULT_CURRENCY, "https://merchant.example/cb")
        .await
        .unwrap();

    assert_eq!(transaction_id, "abc123");
}

#[tokio::test]
async fn transitional_retrieve_accepts_payment_id_field() {
    // v3-transitional integrators still call retrieve_transaction; the
    // legacy markers include paymentId so they keep working.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"paymentId": "abc123"})),
        )
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    #[allow(deprecated)]
    let details = client.retrieve_transaction("abc123").await.unwrap();

    assert_eq!(details.get("paymentId"), Some(&json!("abc123")));
}

#[tokio::test]
async fn non_json_body_is_a_transport_class_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments/abc123"))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
        )
        .mount(&server)
        .await;

    let client = v3_client(&server).await;
    let err = client.get_payment_details("abc123").await.unwrap_err();

    assert!(matches!(err, PayconiqError::InvalidResponse { .. }));
}

#[tokio::test]
async fn connection_failure_is_transient() {
    // Nothing listens on the endpoint; the client must report a transport
    // fault rather than a provider rejection.
    let mut config = PayconiqConfig::v3("access-token");
    config.endpoint = "http://127.0.0.1:1".to_string();
    let client = PayconiqClient::new(config).unwrap();

    let err = client
        .create_payment(100, DEFAULT_CURRENCY, None, "https://merchant.example/cb")
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert!(matches!(err, PayconiqError::Transport { .. }));
}
