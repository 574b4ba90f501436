//! Storefront Engine
//!
//! The core logic of the storefront backend: the product catalog, the order store, and the checkout flow that ties
//! them to a payment provider.
//!
//! The library is divided into three sections:
//! 1. Storage contracts ([`mod@traits`]) and their SQLite implementation ([`SqliteDatabase`]). The data types stored in
//!    the database live in [`mod@db_types`].
//! 2. The public API ([`mod@shop_api`]): [`CatalogApi`], [`OrderApi`] and [`CheckoutApi`]. Each is generic over the
//!    storage traits it needs, so that backends (and test doubles) are interchangeable.
//! 3. Test helpers, behind the `test_utils` feature.
pub mod db_types;
pub mod shop_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::{db::run_migrations, SqliteDatabase};
pub use shop_api::{
    catalog_api::CatalogApi,
    checkout_api::{CheckoutApi, RECONCILIATION_LOG_TARGET},
    checkout_objects,
    errors::{CatalogApiError, CheckoutError, OrderApiError},
    order_api::OrderApi,
};
