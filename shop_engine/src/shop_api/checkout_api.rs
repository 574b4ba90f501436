//! # Checkout orchestration
//!
//! `CheckoutApi` sequences the catalog lookup, the payment provider calls, and order persistence for a purchase.
//! There are two ways through it:
//!
//! * The client-driven flow: [`CheckoutApi::create_order`] opens a payment intent at the provider, the buyer approves
//!   it, and the client then calls [`CheckoutApi::capture_order`] with the intent id.
//! * The redirect flow: the provider sends the buyer back with the intent id in the `token` query parameter and
//!   [`CheckoutApi::complete_redirect`] captures it. [`CheckoutApi::cancel`] handles abandoned payments.
//!
//! An order is written only after the provider confirms a capture, and it always records the amount and currency the
//! provider reported. There is no transaction spanning the capture and the insert. If the insert fails after the funds
//! were captured, the call fails with [`CheckoutError::CaptureNotRecorded`] and the details are logged under the
//! `shop::reconciliation` target.
use std::fmt::Debug;

use log::*;
use shop_common::{CapturedPayment, NewPaymentIntent, PaymentIntent, PaymentProvider};

use crate::{
    db_types::{NewOrder, ProductId},
    shop_api::{
        checkout_objects::{
            CaptureRequest,
            CaptureResult,
            CheckoutOptions,
            CheckoutRequest,
            RedirectCallback,
            RedirectOutcome,
        },
        errors::CheckoutError,
    },
    traits::StorefrontDatabase,
};

pub const RECONCILIATION_LOG_TARGET: &str = "shop::reconciliation";

pub struct CheckoutApi<B, P> {
    db: B,
    provider: P,
    options: CheckoutOptions,
}

impl<B, P> Debug for CheckoutApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi ({:?})", self.options)
    }
}

impl<B, P> CheckoutApi<B, P>
where
    B: StorefrontDatabase,
    P: PaymentProvider,
{
    pub fn new(db: B, provider: P, options: CheckoutOptions) -> Self {
        Self { db, provider, options }
    }

    /// Opens a payment intent for the requested product at its catalog price. Nothing is persisted.
    pub async fn create_order(&self, request: CheckoutRequest) -> Result<PaymentIntent, CheckoutError> {
        let raw_id = request.product_id.as_deref().unwrap_or_default();
        let product_id = raw_id.parse::<ProductId>()?;
        let product = self
            .db
            .fetch_product(product_id)
            .await?
            .ok_or_else(|| CheckoutError::ProductNotFound(product_id.to_string()))?;
        let email = request.payee_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CheckoutError::InvalidArgument(format!("'{email}' is not a valid PayPal email address")));
        }
        let intent = NewPaymentIntent {
            amount: product.price,
            currency: self.options.currency.clone(),
            description: format!("Order for {} by {}", product.name, request.name),
            payee_email: email.to_string(),
            return_url: self.options.return_url.clone(),
            cancel_url: self.options.cancel_url.clone(),
        };
        debug!("🔄️ Creating payment intent for product #{product_id}: {} {}", product.price, intent.currency);
        let intent = self.provider.create_intent(intent).await?;
        info!("🔄️ Payment intent {} created for product #{product_id} ({})", intent.id, intent.status);
        Ok(intent)
    }

    /// Captures an approved intent and records the order.
    pub async fn capture_order(&self, request: CaptureRequest) -> Result<CaptureResult, CheckoutError> {
        let intent_id = request.intent_id.trim();
        if intent_id.is_empty() {
            return Err(CheckoutError::InvalidArgument("A payment intent id is required".to_string()));
        }
        let captured = self.provider.capture_intent(intent_id).await?;
        info!("🔄️ Payment captured: {captured}");
        let product_id = lenient_product_id(request.product_id.as_deref());
        self.record_order(captured, request.name, request.address, product_id).await
    }

    /// Handles the buyer returning from the provider after approving a payment.
    ///
    /// Only a missing token is reported as an error. Every other failure is folded into
    /// [`RedirectOutcome::Failed`], since the buyer is redirected either way.
    pub async fn complete_redirect(&self, callback: RedirectCallback) -> Result<RedirectOutcome, CheckoutError> {
        let has_token = callback.token.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false);
        if !has_token {
            return Err(CheckoutError::InvalidArgument("Missing PayPal token".to_string()));
        }
        match self.capture_order(callback.into()).await {
            Ok(result) => Ok(RedirectOutcome::Completed(result)),
            Err(e) => {
                warn!("🔄️ Could not complete checkout from redirect. {e}");
                Ok(RedirectOutcome::Failed(e))
            },
        }
    }

    /// The buyer abandoned the payment at the provider. Nothing is captured or stored.
    pub fn cancel(&self, token: Option<&str>) {
        info!("🔄️ Checkout cancelled by buyer. Intent: {}", token.unwrap_or("unknown"));
    }

    async fn record_order(
        &self,
        captured: CapturedPayment,
        name: String,
        address: String,
        product_id: Option<ProductId>,
    ) -> Result<CaptureResult, CheckoutError> {
        let order = NewOrder::from_capture(&captured, name, address, product_id);
        match self.db.insert_order(order.clone()).await {
            Ok(order) => {
                info!("🔄️ Order #{} recorded for transaction {}", order.id, order.transaction_id);
                Ok(CaptureResult {
                    status: captured.status,
                    transaction_id: captured.transaction_id,
                    amount: captured.amount,
                    currency: captured.currency,
                    order,
                })
            },
            Err(e) => {
                error!(
                    target: RECONCILIATION_LOG_TARGET,
                    "Captured payment was not recorded. intent={} transaction={} amount={} currency={} buyer={:?} \
                     product={} reason={e}",
                    captured.intent_id,
                    captured.transaction_id,
                    captured.amount,
                    captured.currency,
                    order.name,
                    order.product_id.map(|id| id.to_string()).unwrap_or_else(|| "none".to_string()),
                );
                Err(CheckoutError::CaptureNotRecorded { transaction_id: captured.transaction_id, reason: e.to_string() })
            },
        }
    }
}

/// Buyer-supplied product references on capture are informational. A malformed one is dropped rather than failing a
/// payment that has already been taken.
fn lenient_product_id(raw: Option<&str>) -> Option<ProductId> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<ProductId>() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("🔄️ {e}. The order will be stored without a product reference.");
            None
        },
    }
}
