use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, Order, OrderWithProduct};

/// Inserts a new order using the given connection. A single-row insert, so it is atomic on its own.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let rows: Vec<Order> = sqlx::query_as(
        r#"
            INSERT INTO orders (
                name,
                address,
                product_id,
                transaction_id,
                amount,
                currency
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(order.name)
    .bind(order.address)
    .bind(order.product_id)
    .bind(order.transaction_id)
    .bind(order.amount)
    .bind(order.currency)
    .fetch_all(conn)
    .await?;
    // Drain the RETURNING rows so the statement completes before the caller commits
    let order = rows.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    debug!("🗃️ Order #{} saved for transaction {}", order.id, order.transaction_id);
    Ok(order)
}

/// Returns all orders, oldest first, joined with their product. Orders pointing at a missing product come back with
/// `product: None`.
pub async fn fetch_orders_with_products(conn: &mut SqliteConnection) -> Result<Vec<OrderWithProduct>, sqlx::Error> {
    let orders = sqlx::query_as(
        r#"
            SELECT
                o.*,
                p.id AS p_id,
                p.name AS p_name,
                p.description AS p_description,
                p.price AS p_price,
                p.image AS p_image
            FROM orders o
            LEFT JOIN products p ON p.id = o.product_id
            ORDER BY o.id
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(orders)
}
