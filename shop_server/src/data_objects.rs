use serde::{Deserialize, Serialize};
use shop_common::PaymentIntent;
use shop_engine::checkout_objects::CaptureResult;

/// Response body for `/payment/create-order`. Only the intent id is passed on to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: String,
}

impl From<PaymentIntent> for CreateOrderResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self { id: intent.id }
    }
}

/// Response body for `/payment/capture-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderResponse {
    pub status: String,
    pub transaction_id: String,
    /// The captured amount exactly as PayPal reported it, e.g. "19.99"
    pub amount: String,
}

impl From<CaptureResult> for CaptureOrderResponse {
    fn from(result: CaptureResult) -> Self {
        Self { status: result.status, transaction_id: result.transaction_id, amount: result.amount.to_string() }
    }
}
