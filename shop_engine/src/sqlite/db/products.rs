use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewProduct, Product, ProductId};

pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let products = sqlx::query_as("SELECT id, name, description, price, image FROM products ORDER BY id")
        .fetch_all(conn)
        .await?;
    Ok(products)
}

pub async fn fetch_product(id: ProductId, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let product = sqlx::query_as("SELECT id, name, description, price, image FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(product)
}

/// Inserts a new product and returns the stored record. No validation happens here.
pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, sqlx::Error> {
    let rows: Vec<Product> = sqlx::query_as(
        r#"
            INSERT INTO products (name, description, price, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, image;
        "#,
    )
    .bind(product.name)
    .bind(product.description)
    .bind(product.price)
    .bind(product.image)
    .fetch_all(conn)
    .await?;
    // Drain the RETURNING rows so the statement completes before the caller commits
    let product = rows.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    debug!("🗃️ Product #{} [{}] added to the catalog", product.id, product.name);
    Ok(product)
}
