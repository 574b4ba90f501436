use serde::{Deserialize, Deserializer, Serialize};
use shop_common::{Money, DEFAULT_CURRENCY_CODE};

use crate::{db_types::Order, shop_api::errors::CheckoutError};

/// Settings the checkout flow hands to the payment provider with every new intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOptions {
    /// Where the provider sends the buyer after approving a payment.
    pub return_url: String,
    /// Where the provider sends the buyer after abandoning a payment.
    pub cancel_url: String,
    pub currency: String,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            return_url: "http://localhost:5000/payment/success".to_string(),
            cancel_url: "http://localhost:5000/payment/cancel".to_string(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }
}

impl CheckoutOptions {
    /// Derives the provider callback URLs from the public base URL of the server.
    pub fn for_public_url(public_url: &str, currency: &str) -> Self {
        let base = public_url.trim_end_matches('/');
        Self {
            return_url: format!("{base}/payment/success"),
            cancel_url: format!("{base}/payment/cancel"),
            currency: currency.to_string(),
        }
    }
}

/// Starts a checkout for a single product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "paypalEmail", default)]
    pub payee_email: String,
    #[serde(rename = "productId", default, deserialize_with = "loose_id")]
    pub product_id: Option<String>,
}

/// Captures an intent the buyer has approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    #[serde(rename = "orderID", default)]
    pub intent_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "productId", default, deserialize_with = "loose_id")]
    pub product_id: Option<String>,
}

/// The query string the provider's approval redirect arrives with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectCallback {
    pub token: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

impl From<RedirectCallback> for CaptureRequest {
    fn from(cb: RedirectCallback) -> Self {
        Self {
            intent_id: cb.token.unwrap_or_default(),
            name: cb.name,
            address: cb.address,
            product_id: cb.product_id,
        }
    }
}

/// What a successful capture reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    pub status: String,
    pub transaction_id: String,
    pub amount: Money,
    pub currency: String,
    pub order: Order,
}

/// The result of handling a provider redirect. Anything other than a missing token ends in one of these.
#[derive(Debug, Clone)]
pub enum RedirectOutcome {
    Completed(CaptureResult),
    Failed(CheckoutError),
}

impl RedirectOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Accepts identifiers sent either as JSON strings or as JSON numbers.
fn loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where D: Deserializer<'de> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Text(String),
        Int(i64),
        Float(f64),
    }
    let id = Option::<LooseId>::deserialize(deserializer)?;
    Ok(id.map(|id| match id {
        LooseId::Text(s) => s,
        LooseId::Int(i) => i.to_string(),
        LooseId::Float(f) => f.to_string(),
    }))
}
