use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shop_common::{CapturedPayment, Money};
use sqlx::{sqlite::SqliteRow, FromRow, Row, Type};
use thiserror::Error;

//--------------------------------------     ProductId       ---------------------------------------------------------
/// The system-generated identifier of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct ProductId(i64);

#[derive(Debug, Clone, Error)]
#[error("'{0}' is not a valid product id")]
pub struct ProductIdError(pub String);

impl ProductId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(ProductIdError(value.to_string()))
        }
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| ProductIdError(s.to_string()))?;
        Self::try_from(value).map_err(|_| ProductIdError(s.to_string()))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------      Product        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
}

/// A catalog entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub image: String,
}

impl NewProduct {
    pub fn new<S: Into<String>>(name: S, price: Money) -> Self {
        Self { name: name.into(), description: String::default(), price, image: String::default() }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image<S: Into<String>>(mut self, image: S) -> Self {
        self.image = image.into();
        self
    }

    /// Checks the product before it goes anywhere near the database. Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name cannot be empty".to_string());
        }
        if self.price.is_negative() {
            return Err(format!("Product price cannot be negative ({})", self.price));
        }
        Ok(())
    }
}

//--------------------------------------       Order         ---------------------------------------------------------
/// A completed purchase. Orders only exist for payments that the provider has captured.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub product_id: Option<ProductId>,
    pub transaction_id: String,
    pub amount: Money,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub name: String,
    pub address: String,
    pub product_id: Option<ProductId>,
    pub transaction_id: String,
    pub amount: Money,
    pub currency: String,
}

impl NewOrder {
    /// Builds the order record for a captured payment. Transaction id, amount and currency come from the provider,
    /// never from the buyer.
    pub fn from_capture(
        capture: &CapturedPayment,
        name: String,
        address: String,
        product_id: Option<ProductId>,
    ) -> Self {
        Self {
            name,
            address,
            product_id,
            transaction_id: capture.transaction_id.clone(),
            amount: capture.amount,
            currency: capture.currency.clone(),
        }
    }
}

/// An order with its product record resolved. `product` is `None` when the order references a product that does not
/// exist (or no product at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithProduct {
    #[serde(flatten)]
    pub order: Order,
    pub product: Option<Product>,
}

impl<'r> FromRow<'r, SqliteRow> for OrderWithProduct {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let order = Order::from_row(row)?;
        let product = match row.try_get::<Option<ProductId>, _>("p_id")? {
            Some(id) => Some(Product {
                id,
                name: row.try_get("p_name")?,
                description: row.try_get("p_description")?,
                price: row.try_get("p_price")?,
                image: row.try_get("p_image")?,
            }),
            None => None,
        };
        Ok(Self { order, product })
    }
}
