use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderWithProduct},
    shop_api::errors::OrderApiError,
    traits::OrderManagement,
};

pub struct OrderApi<B> {
    db: B,
}

impl<B> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi")
    }
}

impl<B> OrderApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let order = self.db.insert_order(order).await?;
        Ok(order)
    }

    /// Every order with its product record, oldest first.
    pub async fn list_orders(&self) -> Result<Vec<OrderWithProduct>, OrderApiError> {
        let orders = self.db.fetch_orders_with_products().await?;
        trace!("🗃️ Fetched {} orders", orders.len());
        Ok(orders)
    }
}
