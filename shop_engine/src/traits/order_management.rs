use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderWithProduct};

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Appends an order to the store. The referenced product is not checked.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Every stored order, oldest first, with its product resolved where it still exists.
    async fn fetch_orders_with_products(&self) -> Result<Vec<OrderWithProduct>, OrderStoreError>;
}
