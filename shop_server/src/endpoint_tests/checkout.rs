use actix_web::http::StatusCode;
use serde_json::Value;
use shop_common::{PaymentIntent, PaymentProviderError};
use shop_engine::traits::OrderStoreError;

use super::{
    helpers::{captured, get_request, post_request, product, stored_order, TestBackends},
    mocks::{MockProvider, MockStore},
};

const CREATE_BODY: &str = r#"{"name":"Alice","address":"1 Main St","paypalEmail":"merchant@example.com","productId":"5"}"#;

fn checkout(store: MockStore, provider: MockProvider) -> TestBackends {
    TestBackends { checkout_store: Some(store), provider: Some(provider), ..TestBackends::default() }
}

fn recording_store(times: usize) -> MockStore {
    let mut store = MockStore::new();
    store.expect_insert_order().times(times).returning(|order| Ok(stored_order(1, order)));
    store
}

#[actix_web::test]
async fn create_order_returns_the_intent_id() {
    let mut store = MockStore::new();
    store.expect_fetch_product().times(1).returning(|_| Ok(Some(product(5, "Mug", "19.5"))));
    store.expect_insert_order().never();
    let mut provider = MockProvider::new();
    provider
        .expect_create_intent()
        .withf(|i| i.amount.to_fixed_2dp() == "19.50" && i.description == "Order for Mug by Alice")
        .times(1)
        .returning(|_| {
            Ok(PaymentIntent { id: "5O190127TN364715T".into(), status: "CREATED".into(), approval_url: None })
        });
    let res = post_request("/payment/create-order", CREATE_BODY, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#"{"id":"5O190127TN364715T"}"#);
}

#[actix_web::test]
async fn create_order_with_malformed_product_id() {
    let mut store = MockStore::new();
    store.expect_fetch_product().never();
    let mut provider = MockProvider::new();
    provider.expect_create_intent().never();
    let body = r#"{"name":"Alice","address":"1 Main St","paypalEmail":"merchant@example.com","productId":"abc"}"#;
    let res = post_request("/payment/create-order", body, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, r#"{"error":"'abc' is not a valid product id"}"#);
}

#[actix_web::test]
async fn create_order_for_missing_product() {
    let mut store = MockStore::new();
    store.expect_fetch_product().returning(|_| Ok(None));
    let mut provider = MockProvider::new();
    provider.expect_create_intent().never();
    let res = post_request("/payment/create-order", CREATE_BODY, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_order_provider_failure() {
    let mut store = MockStore::new();
    store.expect_fetch_product().returning(|_| Ok(Some(product(5, "Mug", "19.5"))));
    let mut provider = MockProvider::new();
    provider.expect_create_intent().returning(|_| Err(PaymentProviderError::Transport("connection refused".into())));
    let res = post_request("/payment/create-order", CREATE_BODY, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("connection refused"), "was: {}", res.body);
}

#[actix_web::test]
async fn capture_order() {
    let mut store = MockStore::new();
    store
        .expect_insert_order()
        .withf(|o| {
            o.transaction_id == "T1" &&
                o.amount.to_string() == "19.99" &&
                o.currency == "USD" &&
                o.name == "Alice" &&
                o.product_id.map(|p| p.value()) == Some(5)
        })
        .times(1)
        .returning(|order| Ok(stored_order(11, order)));
    let mut provider = MockProvider::new();
    provider.expect_capture_intent().times(1).returning(|id| Ok(captured(id, "T1", "19.99")));
    let body = r#"{"orderID":"5O190127TN364715T","name":"Alice","address":"1 Main St","productId":5}"#;
    let res = post_request("/payment/capture-order", body, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::OK);
    let json: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["transactionId"], "T1");
    assert_eq!(json["amount"], "19.99");
}

#[actix_web::test]
async fn capture_order_provider_failure() {
    let mut store = MockStore::new();
    store.expect_insert_order().never();
    let mut provider = MockProvider::new();
    provider
        .expect_capture_intent()
        .returning(|_| Err(PaymentProviderError::Rejected { status: 422, message: "ORDER_ALREADY_CAPTURED".into() }));
    let body = r#"{"orderID":"5O190127TN364715T","name":"Alice","address":"1 Main St","productId":"5"}"#;
    let res = post_request("/payment/capture-order", body, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("ORDER_ALREADY_CAPTURED"), "was: {}", res.body);
}

#[actix_web::test]
async fn capture_order_not_recorded() {
    let mut store = MockStore::new();
    store.expect_insert_order().returning(|_| Err(OrderStoreError::DatabaseError("disk I/O error".into())));
    let mut provider = MockProvider::new();
    provider.expect_capture_intent().returning(|id| Ok(captured(id, "T1", "19.99")));
    let body = r#"{"orderID":"5O190127TN364715T","name":"Alice","address":"1 Main St","productId":"5"}"#;
    let res = post_request("/payment/capture-order", body, checkout(store, provider)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("T1"), "was: {}", res.body);
}

#[actix_web::test]
async fn capture_order_with_malformed_body() {
    let res = post_request("/payment/capture-order", "not json", TestBackends::default()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.starts_with(r#"{"error":"#), "was: {}", res.body);
}

#[actix_web::test]
async fn success_redirect_records_the_order() {
    let mut provider = MockProvider::new();
    provider.expect_capture_intent().times(1).returning(|id| {
        assert_eq!(id, "EC-42");
        Ok(captured(id, "T2", "5.00"))
    });
    let res = get_request(
        "/payment/success?token=EC-42&PayerID=XYZ&name=Bob&address=2%20High%20St&productId=5",
        checkout(recording_store(1), provider),
    )
    .await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location(), Some("/frontend/checkout-success.html"));
}

#[actix_web::test]
async fn success_redirect_with_failed_capture() {
    let mut provider = MockProvider::new();
    provider
        .expect_capture_intent()
        .times(1)
        .returning(|_| Err(PaymentProviderError::Rejected { status: 422, message: "ORDER_NOT_APPROVED".into() }));
    let res = get_request("/payment/success?token=EC-42&name=Bob", checkout(recording_store(0), provider)).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location(), Some("/frontend/checkout-failed.html"));
}

#[actix_web::test]
async fn success_redirect_without_token() {
    let mut provider = MockProvider::new();
    provider.expect_capture_intent().never();
    let res = get_request("/payment/success?name=Bob", checkout(recording_store(0), provider)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, r#"{"error":"Missing PayPal token"}"#);
}

#[actix_web::test]
async fn cancel_redirects_to_the_failure_page() {
    for path in ["/payment/cancel", "/payment/cancel?token=EC-42", "/payment/cancel?token="] {
        let mut provider = MockProvider::new();
        provider.expect_create_intent().never();
        provider.expect_capture_intent().never();
        let res = get_request(path, checkout(recording_store(0), provider)).await;
        assert_eq!(res.status, StatusCode::FOUND, "{path}");
        assert_eq!(res.location(), Some("/frontend/checkout-failed.html"));
        assert!(res.body.is_empty());
    }
}
