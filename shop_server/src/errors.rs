use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use shop_engine::{CatalogApiError, CheckoutError, OrderApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Could not read query string: {0}")]
    InvalidQuery(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Error processing payment. {0}")]
    PaymentError(String),
    #[error("Payment was captured but could not be recorded. {0}")]
    PaymentNotRecorded(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentNotRecorded(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::InvalidArgument(s) => Self::InvalidArgument(s),
            CatalogApiError::ValidationError(s) => Self::InvalidRequestBody(s),
            CatalogApiError::NotFound(id) => Self::NoRecordFound(format!("Product {id} does not exist")),
            CatalogApiError::StorageError(s) => Self::BackendError(s),
        }
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::StorageError(s) => Self::BackendError(s),
        }
    }
}

impl From<CheckoutError> for ServerError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::InvalidArgument(s) => Self::InvalidArgument(s),
            CheckoutError::ProductNotFound(id) => Self::NoRecordFound(format!("Product {id} does not exist")),
            CheckoutError::ProviderError(e) => Self::PaymentError(e.to_string()),
            CheckoutError::StorageError(s) => Self::BackendError(s),
            CheckoutError::CaptureNotRecorded { transaction_id, .. } => Self::PaymentNotRecorded(format!(
                "Keep your PayPal transaction id ({transaction_id}) and contact the merchant."
            )),
        }
    }
}
