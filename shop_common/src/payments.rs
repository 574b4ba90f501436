//! The contract between the checkout flow and a remote payment provider.
//!
//! A provider exposes exactly two operations: creating a payment intent that the buyer approves on the provider's
//! site, and capturing an approved intent. Each call is a single remote round trip. There are no retries and no
//! idempotency keys.
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Money;

#[derive(Debug, Clone, Error)]
pub enum PaymentProviderError {
    #[error("Could not reach the payment provider. {0}")]
    Transport(String),
    #[error("The payment provider rejected the request. Error {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("The payment provider returned an unexpected response. {0}")]
    UnexpectedResponse(String),
    #[error("The payment provider client is misconfigured. {0}")]
    Configuration(String),
}

/// Everything the provider needs to open a payment intent on behalf of a buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPaymentIntent {
    pub amount: Money,
    pub currency: String,
    pub description: String,
    pub payee_email: String,
    pub return_url: String,
    pub cancel_url: String,
}

/// A payment intent as issued by the provider. It is never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
    /// Where the buyer should be sent to approve the payment, if the provider supplied a link.
    pub approval_url: Option<String>,
}

/// The outcome of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPayment {
    pub intent_id: String,
    pub status: String,
    pub transaction_id: String,
    pub amount: Money,
    pub currency: String,
}

impl Display for CapturedPayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "intent {} / tx {} ({}): {} {}",
            self.intent_id, self.transaction_id, self.status, self.amount, self.currency
        )
    }
}

/// The operations the checkout flow requires of a payment provider.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    /// Opens a new payment intent for the given amount. Fails if the provider responds with anything other than
    /// success.
    async fn create_intent(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, PaymentProviderError>;

    /// Captures a previously approved intent. Fails if the intent is invalid, already captured, or expired.
    async fn capture_intent(&self, intent_id: &str) -> Result<CapturedPayment, PaymentProviderError>;
}
