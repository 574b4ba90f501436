//! Request handler definitions
//!
//! Define each route and its handler here. Handlers only translate between HTTP and the engine APIs; anything more
//! involved belongs in `shop_engine`.
//!
//! Handlers must not block the worker thread. All database and PayPal calls are async, so a slow provider only
//! stalls the request that is waiting on it.
use actix_web::{get, http::header::LOCATION, web, HttpRequest, HttpResponse, Responder};
use log::*;
use serde::Deserialize;
use shop_common::PaymentProvider;
use shop_engine::{
    checkout_objects::{CaptureRequest, CheckoutRequest, RedirectCallback, RedirectOutcome},
    db_types::NewProduct,
    traits::{CatalogManagement, OrderManagement, StorefrontDatabase},
    CatalogApi,
    CheckoutApi,
    OrderApi,
};

use crate::{
    config::RedirectTargets,
    data_objects::{CaptureOrderResponse, CreateOrderResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(list_products => Get "/products" impl CatalogManagement);
pub async fn list_products<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET products");
    let products = api.list_products().await.map_err(|e| {
        warn!("💻️ Could not fetch products. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(products))
}

route!(create_product => Post "/products" impl CatalogManagement);
/// Route handler for adding a product to the catalog.
///
/// The body must contain a non-empty `name` and a non-negative `price`. `description` and `image` are optional.
/// Returns the stored product, including its new id, with status 201.
pub async fn create_product<B: CatalogManagement>(
    body: web::Json<NewProduct>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = body.into_inner();
    debug!("💻️ POST product [{}]", product.name);
    let product = api.create_product(product).await.map_err(|e| {
        warn!("💻️ Could not create product. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Created().json(product))
}

route!(product_by_id => Get "/products/{id}" impl CatalogManagement);
pub async fn product_by_id<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET product {id}");
    let product = api.get_product(&id).await.map_err(|e| {
        debug!("💻️ Could not fetch product {id}. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(product))
}

//----------------------------------------------   Checkout  ----------------------------------------------------
route!(create_order => Post "/create-order" impl StorefrontDatabase, PaymentProvider);
/// Route handler for starting a checkout.
///
/// Opens a PayPal order for the product's catalog price and returns its id. The client hands the id to the PayPal
/// buttons, and calls `/payment/capture-order` once the buyer has approved the payment.
pub async fn create_order<B: StorefrontDatabase, P: PaymentProvider>(
    body: web::Json<CheckoutRequest>,
    api: web::Data<CheckoutApi<B, P>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST create-order for product {:?}", request.product_id);
    let intent = api.create_order(request).await.map_err(|e| {
        warn!("💻️ Could not create PayPal order. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(CreateOrderResponse::from(intent)))
}

route!(capture_order => Post "/capture-order" impl StorefrontDatabase, PaymentProvider);
pub async fn capture_order<B: StorefrontDatabase, P: PaymentProvider>(
    body: web::Json<CaptureRequest>,
    api: web::Data<CheckoutApi<B, P>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST capture-order for {}", request.intent_id);
    let result = api.capture_order(request).await.map_err(|e| {
        warn!("💻️ Could not capture PayPal order. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(CaptureOrderResponse::from(result)))
}

route!(payment_success => Get "/success" impl StorefrontDatabase, PaymentProvider);
/// Route handler for PayPal's approval redirect.
///
/// PayPal appends the order id as `token`. The payment is captured and the buyer redirected to the success page, or
/// to the failure page if anything goes wrong. Only a missing token gets an error response.
pub async fn payment_success<B: StorefrontDatabase, P: PaymentProvider>(
    query: web::Query<RedirectCallback>,
    api: web::Data<CheckoutApi<B, P>>,
    targets: web::Data<RedirectTargets>,
) -> Result<HttpResponse, ServerError> {
    let callback = query.into_inner();
    debug!("💻️ GET payment success for {:?}", callback.token);
    let outcome = api.complete_redirect(callback).await?;
    match outcome {
        RedirectOutcome::Completed(result) => {
            info!("💻️ Checkout complete. Order #{} recorded", result.order.id);
            Ok(redirect_to(&targets.success))
        },
        RedirectOutcome::Failed(e) => {
            warn!("💻️ Checkout failed after redirect. {e}");
            Ok(redirect_to(&targets.failure))
        },
    }
}

#[derive(Debug, Default, Deserialize)]
struct CancelParams {
    token: Option<String>,
}

route!(payment_cancel => Get "/cancel" impl StorefrontDatabase, PaymentProvider);
pub async fn payment_cancel<B: StorefrontDatabase, P: PaymentProvider>(
    req: HttpRequest,
    api: web::Data<CheckoutApi<B, P>>,
    targets: web::Data<RedirectTargets>,
) -> HttpResponse {
    // The buyer is redirected no matter what the query string holds
    let params = web::Query::<CancelParams>::from_query(req.query_string()).map(|q| q.into_inner()).unwrap_or_default();
    api.cancel(params.token.as_deref());
    redirect_to(&targets.failure)
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(orders => Get "/orders" impl OrderManagement);
pub async fn orders<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders");
    let orders = api.list_orders().await.map_err(|e| {
        warn!("💻️ Could not fetch orders. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(orders))
}

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found().insert_header((LOCATION, location)).finish()
}
