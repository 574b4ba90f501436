use actix_web::http::StatusCode;
use serde_json::Value;
use shop_common::Money;
use shop_engine::{
    db_types::{NewOrder, OrderWithProduct, ProductId},
    traits::OrderStoreError,
};

use super::{
    helpers::{get_request, money, product, stored_order, TestBackends},
    mocks::MockStore,
};

fn new_order(tx: &str, product_id: Option<i64>, amount: Money) -> NewOrder {
    NewOrder {
        name: "Alice".to_string(),
        address: "1 Main St".to_string(),
        product_id: product_id.map(|id| ProductId::try_from(id).unwrap()),
        transaction_id: tx.to_string(),
        amount,
        currency: "USD".to_string(),
    }
}

#[actix_web::test]
async fn list_orders_with_products() {
    let mut store = MockStore::new();
    store.expect_fetch_orders_with_products().times(1).returning(|| {
        Ok(vec![
            OrderWithProduct {
                order: stored_order(1, new_order("T1", Some(5), money("19.99"))),
                product: Some(product(5, "Mug", "19.99")),
            },
            OrderWithProduct { order: stored_order(2, new_order("T2", None, money("3.5"))), product: None },
        ])
    });
    let backends = TestBackends { orders: Some(store), ..TestBackends::default() };
    let res = get_request("/payment/orders", backends).await;
    assert_eq!(res.status, StatusCode::OK);
    let json: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["transactionId"], "T1");
    assert_eq!(json[0]["amount"], 19.99);
    assert_eq!(json[0]["productId"], 5);
    assert_eq!(json[0]["product"]["name"], "Mug");
    assert_eq!(json[0]["createdAt"], "2024-06-01T12:00:00Z");
    assert!(json[1]["productId"].is_null());
    assert!(json[1]["product"].is_null());
}

#[actix_web::test]
async fn list_orders_storage_failure() {
    let mut store = MockStore::new();
    store
        .expect_fetch_orders_with_products()
        .returning(|| Err(OrderStoreError::DatabaseError("no such table: orders".into())));
    let backends = TestBackends { orders: Some(store), ..TestBackends::default() };
    let res = get_request("/payment/orders", backends).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("no such table"), "was: {}", res.body);
}
