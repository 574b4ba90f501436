use actix_web::http::StatusCode;
use serde_json::Value;
use shop_engine::{
    db_types::{Product, ProductId},
    traits::CatalogError,
};

use super::{
    helpers::{get_request, money, post_request, product, TestBackends},
    mocks::MockStore,
};

fn catalog(store: MockStore) -> TestBackends {
    TestBackends { catalog: Some(store), ..TestBackends::default() }
}

#[actix_web::test]
async fn health_check() {
    let res = get_request("/health", TestBackends::default()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "👍️\n");
}

#[actix_web::test]
async fn list_products() {
    let mut store = MockStore::new();
    store.expect_fetch_products().times(1).returning(|| Ok(vec![product(1, "Mug", "12.5"), product(2, "Pot", "30")]));
    let res = get_request("/products", catalog(store)).await;
    assert_eq!(res.status, StatusCode::OK);
    let json: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["name"], "Mug");
    assert_eq!(json[0]["price"], 12.5);
    assert_eq!(json[0]["image"], "/img/1.png");
    assert_eq!(json[1]["price"], 30.0);
}

#[actix_web::test]
async fn list_products_storage_failure() {
    let mut store = MockStore::new();
    store.expect_fetch_products().returning(|| Err(CatalogError::DatabaseError("database is locked".into())));
    let res = get_request("/products", catalog(store)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("database is locked"), "was: {}", res.body);
}

#[actix_web::test]
async fn fetch_product_by_id() {
    let mut store = MockStore::new();
    store
        .expect_fetch_product()
        .withf(|id| id.value() == 7)
        .times(1)
        .returning(|_| Ok(Some(product(7, "Kettle", "45.00"))));
    let res = get_request("/products/7", catalog(store)).await;
    assert_eq!(res.status, StatusCode::OK);
    let fetched: Product = serde_json::from_str(&res.body).unwrap();
    assert_eq!(fetched, product(7, "Kettle", "45.00"));
}

#[actix_web::test]
async fn fetch_product_with_malformed_id() {
    let mut store = MockStore::new();
    store.expect_fetch_product().never();
    let res = get_request("/products/abc", catalog(store)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, r#"{"error":"'abc' is not a valid product id"}"#);
}

#[actix_web::test]
async fn fetch_missing_product() {
    let mut store = MockStore::new();
    store.expect_fetch_product().returning(|_| Ok(None));
    let res = get_request("/products/99", catalog(store)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, r#"{"error":"The data was not found. Product 99 does not exist"}"#);
}

#[actix_web::test]
async fn create_product() {
    let mut store = MockStore::new();
    store
        .expect_insert_product()
        .withf(|p| p.name == "Mug" && p.price == money("9.99") && p.description.is_empty() && p.image.is_empty())
        .times(1)
        .returning(|p| {
            Ok(Product {
                id: ProductId::try_from(3i64).unwrap(),
                name: p.name,
                description: p.description,
                price: p.price,
                image: p.image,
            })
        });
    let res = post_request("/products", r#"{"name": "Mug", "price": 9.99}"#, catalog(store)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let json: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["price"], 9.99);
    assert_eq!(json["description"], "");
}

#[actix_web::test]
async fn create_product_without_price_stores_nothing() {
    let mut store = MockStore::new();
    store.expect_insert_product().never();
    let res = post_request("/products", r#"{"name": "Mug"}"#, catalog(store)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.contains("price"), "was: {}", res.body);
    assert!(res.body.starts_with(r#"{"error":"#));
}

#[actix_web::test]
async fn create_invalid_products() {
    for body in [r#"{"name": " ", "price": 1}"#, r#"{"name": "Mug", "price": -1}"#, r#"{"name": "Mug", "#] {
        let mut store = MockStore::new();
        store.expect_insert_product().never();
        let res = post_request("/products", body, catalog(store)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body {body} gave {}", res.body);
        let json: Value = serde_json::from_str(&res.body).unwrap();
        assert!(json["error"].is_string());
    }
}
