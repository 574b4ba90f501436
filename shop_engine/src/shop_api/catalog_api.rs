//! Read and create catalog products.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewProduct, Product, ProductId},
    shop_api::errors::CatalogApiError,
    traits::CatalogManagement,
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        let products = self.db.fetch_products().await?;
        trace!("🗃️ Fetched {} products", products.len());
        Ok(products)
    }

    /// Validates and stores a new product. Nothing is written if validation fails.
    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogApiError> {
        product.validate().map_err(CatalogApiError::ValidationError)?;
        let product = self.db.insert_product(product).await?;
        info!("🗃️ New product #{} [{}] at {}", product.id, product.name, product.price);
        Ok(product)
    }

    /// Looks a product up by the id as supplied by a caller. The id must be a positive integer.
    pub async fn get_product(&self, id: &str) -> Result<Product, CatalogApiError> {
        let id = id.parse::<ProductId>()?;
        self.product_by_id(id).await
    }

    pub async fn product_by_id(&self, id: ProductId) -> Result<Product, CatalogApiError> {
        self.db.fetch_product(id).await?.ok_or_else(|| CatalogApiError::NotFound(id.to_string()))
    }
}
