//! # Storage contracts
//!
//! These traits define the behaviour a database backend must expose to act as the storefront's store.
//!
//! * [`CatalogManagement`] reads and creates catalog products.
//! * [`OrderManagement`] appends completed orders and lists them with their products.
//! * [`StorefrontDatabase`] is shorthand for a backend that does both, which is what checkout needs.
//!
//! [`crate::SqliteDatabase`] implements both. The public APIs in [`crate::shop_api`] are generic over these traits, so
//! tests can substitute any implementation.
mod catalog_management;
mod order_management;

pub use catalog_management::{CatalogError, CatalogManagement};
pub use order_management::{OrderManagement, OrderStoreError};

/// A backend that holds both the catalog and the orders. Implemented automatically.
pub trait StorefrontDatabase: CatalogManagement + OrderManagement {}

impl<T> StorefrontDatabase for T where T: CatalogManagement + OrderManagement {}
