//! `SqliteDatabase` is the concrete storefront backend.
//!
//! It implements [`CatalogManagement`] and [`OrderManagement`] on top of a shared `SqlitePool`. Cloning it is cheap;
//! every clone uses the same pool.
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{new_pool, orders, products, run_migrations};
use crate::{
    db_types::{NewOrder, NewProduct, Order, OrderWithProduct, Product, ProductId},
    traits::{CatalogError, CatalogManagement, OrderManagement, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Brings the schema up to date with the embedded migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        run_migrations(&self.pool).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let result = products::fetch_products(&mut conn).await?;
        Ok(result)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        let result = products::fetch_product(id, &mut conn).await?;
        Ok(result)
    }

    async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let result = products::insert_product(product, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut tx = self.pool.begin().await?;
        let result = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn fetch_orders_with_products(&self) -> Result<Vec<OrderWithProduct>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let result = orders::fetch_orders_with_products(&mut conn).await?;
        Ok(result)
    }
}
