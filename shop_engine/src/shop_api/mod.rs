//! # Storefront engine public API
//!
//! * [`catalog_api`] lists, fetches and creates catalog products.
//! * [`order_api`] lists completed orders with their products.
//! * [`checkout_api`] runs a purchase from payment intent to recorded order.
//!
//! Every API is created by supplying a backend that implements the traits it needs. The checkout API additionally
//! takes a [`shop_common::PaymentProvider`].
//!
//! ```rust,ignore
//! use shop_engine::{CatalogApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/shop_store.db", 5).await?;
//! let api = CatalogApi::new(db);
//! let product = api.get_product("1").await?;
//! ```
pub mod catalog_api;
pub mod checkout_api;
pub mod checkout_objects;
pub mod errors;
pub mod order_api;
