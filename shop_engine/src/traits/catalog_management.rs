use thiserror::Error;

use crate::db_types::{NewProduct, Product, ProductId};

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::DatabaseError(e.to_string())
    }
}

/// Behaviour for reading and extending the product catalog. Products are never modified or removed once created.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Returns every product in the catalog, ordered by id.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetches the product with the given id. If it does not exist, `None` is returned.
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;

    /// Stores a new product and returns the stored record, including its generated id. The product is assumed to be
    /// valid.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError>;
}
