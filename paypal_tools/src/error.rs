use shop_common::PaymentProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaypalApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Could not obtain an access token. {0}")]
    AuthenticationError(String),
    #[error("The capture response for order {0} did not contain a capture record")]
    MissingCapture(String),
    #[error("Invalid currency amount: {0}")]
    InvalidCurrencyAmount(String),
}

impl From<PaypalApiError> for PaymentProviderError {
    fn from(e: PaypalApiError) -> Self {
        match e {
            PaypalApiError::QueryError { status, message } => Self::Rejected { status, message },
            PaypalApiError::Initialization(s) => Self::Configuration(s),
            PaypalApiError::RestRequestError(_) | PaypalApiError::RestResponseError(_) => {
                Self::Transport(e.to_string())
            },
            PaypalApiError::AuthenticationError(_) => Self::Rejected { status: 401, message: e.to_string() },
            PaypalApiError::JsonError(_) |
            PaypalApiError::MissingCapture(_) |
            PaypalApiError::InvalidCurrencyAmount(_) => Self::UnexpectedResponse(e.to_string()),
        }
    }
}
