//! Wire types for the subset of the PayPal Orders v2 API used by the storefront.
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shop_common::{CapturedPayment, Money, NewPaymentIntent, PaymentIntent};

use crate::PaypalApiError;

pub const CAPTURE_INTENT: &str = "CAPTURE";

//--------------------------------------      Requests       ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub intent: String,
    pub application_context: ApplicationContext,
    pub purchase_units: Vec<PurchaseUnitRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationContext {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseUnitRequest {
    pub amount: AmountWithCurrency,
    pub description: String,
    pub payee: Payee,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountWithCurrency {
    pub currency_code: String,
    /// PayPal expresses amounts as decimal strings, e.g. "19.99"
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    pub email_address: String,
}

impl From<&NewPaymentIntent> for CreateOrderRequest {
    fn from(intent: &NewPaymentIntent) -> Self {
        Self {
            intent: CAPTURE_INTENT.to_string(),
            application_context: ApplicationContext {
                return_url: intent.return_url.clone(),
                cancel_url: intent.cancel_url.clone(),
            },
            purchase_units: vec![PurchaseUnitRequest {
                amount: AmountWithCurrency {
                    currency_code: intent.currency.clone(),
                    value: intent.amount.to_fixed_2dp(),
                },
                description: intent.description.clone(),
                payee: Payee { email_address: intent.payee_email.clone() },
            }],
        }
    }
}

//--------------------------------------      Responses      ---------------------------------------------------------
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime of the token, in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaypalOrder {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkDescription {
    pub href: String,
    pub rel: String,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PurchaseUnit {
    pub reference_id: Option<String>,
    pub payments: Option<Payments>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Payments {
    #[serde(default)]
    pub captures: Vec<Capture>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Capture {
    pub id: String,
    pub status: String,
    pub amount: AmountWithCurrency,
}

impl PaypalOrder {
    /// The link the buyer follows to approve the payment. Newer API versions call it `payer-action`.
    pub fn approval_url(&self) -> Option<&str> {
        self.links.iter().find(|l| l.rel == "approve" || l.rel == "payer-action").map(|l| l.href.as_str())
    }

    /// The first capture of the first purchase unit. The storefront only ever creates single-unit orders.
    pub fn first_capture(&self) -> Option<&Capture> {
        self.purchase_units.first().and_then(|u| u.payments.as_ref()).and_then(|p| p.captures.first())
    }

    pub fn to_payment_intent(&self) -> PaymentIntent {
        PaymentIntent {
            id: self.id.clone(),
            status: self.status.clone(),
            approval_url: self.approval_url().map(String::from),
        }
    }

    pub fn to_captured_payment(&self) -> Result<CapturedPayment, PaypalApiError> {
        let capture = self.first_capture().ok_or_else(|| PaypalApiError::MissingCapture(self.id.clone()))?;
        let amount = Money::from_str(&capture.amount.value).map_err(|e| {
            PaypalApiError::InvalidCurrencyAmount(format!("Capture {} has an invalid amount. {e}", capture.id))
        })?;
        Ok(CapturedPayment {
            intent_id: self.id.clone(),
            status: self.status.clone(),
            transaction_id: capture.id.clone(),
            amount,
            currency: capture.amount.currency_code.clone(),
        })
    }
}
