use std::str::FromStr;

use actix_web::{
    body::MessageBody,
    http::{header::HeaderMap, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{TimeZone, Utc};
use log::debug;
use shop_common::{CapturedPayment, Money};
use shop_engine::{
    checkout_objects::CheckoutOptions,
    db_types::{NewOrder, Order, Product, ProductId},
    CatalogApi,
    CheckoutApi,
    OrderApi,
};

use super::mocks::{MockProvider, MockStore};
use crate::{config::RedirectTargets, server::configure_routes};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").and_then(|v| v.to_str().ok())
    }
}

/// The mocks each API is built from. Any mock left as `None` gets a fresh mock with no expectations, which fails the
/// test if it is called.
#[derive(Default)]
pub struct TestBackends {
    pub catalog: Option<MockStore>,
    pub orders: Option<MockStore>,
    pub checkout_store: Option<MockStore>,
    pub provider: Option<MockProvider>,
}

fn configure(backends: TestBackends) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let catalog = CatalogApi::new(backends.catalog.unwrap_or_default());
        let orders = OrderApi::new(backends.orders.unwrap_or_default());
        let checkout = CheckoutApi::new(
            backends.checkout_store.unwrap_or_default(),
            backends.provider.unwrap_or_default(),
            CheckoutOptions::default(),
        );
        cfg.app_data(web::Data::new(catalog))
            .app_data(web::Data::new(orders))
            .app_data(web::Data::new(checkout))
            .app_data(web::Data::new(RedirectTargets::default()));
        configure_routes::<MockStore, MockProvider>(cfg);
    }
}

pub async fn send(req: TestRequest, backends: TestBackends) -> TestResponse {
    let _ = env_logger::try_init();
    let app = test::init_service(App::new().configure(configure(backends))).await;
    debug!("Making request");
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    TestResponse { status, headers, body }
}

pub async fn get_request(path: &str, backends: TestBackends) -> TestResponse {
    send(TestRequest::get().uri(path), backends).await
}

pub async fn post_request(path: &str, body: &str, backends: TestBackends) -> TestResponse {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string());
    send(req, backends).await
}

pub fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

pub fn product(id: i64, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::try_from(id).unwrap(),
        name: name.to_string(),
        description: format!("A very fine {name}"),
        price: money(price),
        image: format!("/img/{id}.png"),
    }
}

pub fn captured(intent_id: &str, tx: &str, amount: &str) -> CapturedPayment {
    CapturedPayment {
        intent_id: intent_id.to_string(),
        status: "COMPLETED".to_string(),
        transaction_id: tx.to_string(),
        amount: money(amount),
        currency: "USD".to_string(),
    }
}

pub fn stored_order(id: i64, order: NewOrder) -> Order {
    Order {
        id,
        name: order.name,
        address: order.address,
        product_id: order.product_id,
        transaction_id: order.transaction_id,
        amount: order.amount,
        currency: order.currency,
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }
}
