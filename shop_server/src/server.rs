use std::time::Duration;

use actix_web::{
    dev::Server,
    error::InternalError,
    http::KeepAlive,
    middleware::Logger,
    web,
    web::ServiceConfig,
    App,
    HttpServer,
    ResponseError,
};
use log::*;
use paypal_tools::PaypalApi;
use shop_common::PaymentProvider;
use shop_engine::{traits::StorefrontDatabase, CatalogApi, CheckoutApi, OrderApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        CaptureOrderRoute,
        CreateOrderRoute,
        CreateProductRoute,
        ListProductsRoute,
        OrdersRoute,
        PaymentCancelRoute,
        PaymentSuccessRoute,
        ProductByIdRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Migrations failed. {e}")))?;
        info!("🗃️ Database schema is up to date");
    }
    info!("💳️ Using the PayPal {} environment at {}", config.paypal.environment, config.paypal.base_url());
    let provider = PaypalApi::new(config.paypal.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db, provider)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    provider: PaypalApi,
) -> Result<Server, ServerError> {
    let options = config.checkout_options();
    let redirects = config.redirects.clone();
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let order_api = OrderApi::new(db.clone());
        let checkout_api = CheckoutApi::new(db.clone(), provider.clone(), options.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("shop::access_log"))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(redirects.clone()))
            .configure(configure_routes::<SqliteDatabase, PaypalApi>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every route, along with the extractor settings that turn malformed requests into JSON errors.
///
/// The APIs the handlers use (`CatalogApi<B>`, `OrderApi<B>`, `CheckoutApi<B, P>`) and the [`RedirectTargets`] must be
/// supplied as app data by the caller.
///
/// [`RedirectTargets`]: crate::config::RedirectTargets
pub fn configure_routes<B, P>(cfg: &mut ServiceConfig)
where
    B: StorefrontDatabase + 'static,
    P: PaymentProvider + 'static,
{
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request body. {err}");
        let response = ServerError::InvalidRequestBody(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting query string. {err}");
        let response = ServerError::InvalidQuery(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    });
    let path_config = web::PathConfig::default().error_handler(|err, _req| {
        let response = ServerError::InvalidRequestPath(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    });
    let payment_scope = web::scope("/payment")
        .service(CreateOrderRoute::<B, P>::new())
        .service(CaptureOrderRoute::<B, P>::new())
        .service(PaymentSuccessRoute::<B, P>::new())
        .service(PaymentCancelRoute::<B, P>::new())
        .service(OrdersRoute::<B>::new());
    cfg.app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .service(health)
        .service(ListProductsRoute::<B>::new())
        .service(CreateProductRoute::<B>::new())
        .service(ProductByIdRoute::<B>::new())
        .service(payment_scope);
}
