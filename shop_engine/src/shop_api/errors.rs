use shop_common::PaymentProviderError;
use thiserror::Error;

use crate::{
    db_types::ProductIdError,
    traits::{CatalogError, OrderStoreError},
};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid product: {0}")]
    ValidationError(String),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<CatalogError> for CatalogApiError {
    fn from(e: CatalogError) -> Self {
        Self::StorageError(e.to_string())
    }
}

impl From<ProductIdError> for CatalogApiError {
    fn from(e: ProductIdError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<OrderStoreError> for OrderApiError {
    fn from(e: OrderStoreError) -> Self {
        Self::StorageError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Payment provider error: {0}")]
    ProviderError(#[from] PaymentProviderError),
    #[error("Storage error: {0}")]
    StorageError(String),
    /// The provider captured the funds, but the order could not be written. This needs manual reconciliation.
    #[error("Payment {transaction_id} was captured but the order could not be recorded. {reason}")]
    CaptureNotRecorded { transaction_id: String, reason: String },
}

impl From<ProductIdError> for CheckoutError {
    fn from(e: ProductIdError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

impl From<CatalogError> for CheckoutError {
    fn from(e: CatalogError) -> Self {
        Self::StorageError(e.to_string())
    }
}
