use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shop_common::{CapturedPayment, NewPaymentIntent, PaymentIntent, PaymentProvider, PaymentProviderError};
use tokio::sync::RwLock;

use crate::{
    config::PaypalConfig,
    data_objects::{AccessToken, CreateOrderRequest, PaypalOrder},
    PaypalApiError,
};

/// Tokens are refreshed this long before PayPal says they expire.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

#[derive(Clone)]
pub struct PaypalApi {
    config: PaypalConfig,
    client: Arc<Client>,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl PaypalApi {
    pub fn new(config: PaypalConfig) -> Result<Self, PaypalApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaypalApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client), token: Arc::new(RwLock::new(None)) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    /// Returns a valid bearer token, requesting a new one from PayPal if the cached token is missing or stale.
    pub async fn access_token(&self) -> Result<String, PaypalApiError> {
        if let Some(cached) = self.token.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(cached.token.clone());
        }
        let mut guard = self.token.write().await;
        // Another request may have refreshed the token while we waited for the lock
        if let Some(cached) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(cached.token.clone());
        }
        let token = self.fetch_access_token().await?;
        let lifetime = (token.expires_in - TOKEN_EXPIRY_MARGIN_SECS).max(0);
        let cached = CachedToken { token: token.access_token, expires_at: Utc::now() + Duration::seconds(lifetime) };
        debug!("💳️ New PayPal access token obtained. It expires at {}", cached.expires_at);
        let result = cached.token.clone();
        *guard = Some(cached);
        Ok(result)
    }

    async fn fetch_access_token(&self) -> Result<AccessToken, PaypalApiError> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(PaypalApiError::AuthenticationError("PayPal client credentials are not configured".into()));
        }
        let url = self.url("/v1/oauth2/token");
        trace!("💳️ Requesting access token from {url}");
        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.client_id, Some(self.config.client_secret.reveal()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| PaypalApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            response.json::<AccessToken>().await.map_err(|e| PaypalApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PaypalApiError::AuthenticationError(format!("Error {status}. {message}")))
        }
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, PaypalApiError> {
        let token = self.access_token().await?;
        let url = self.url(path);
        trace!("💳️ Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| PaypalApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("💳️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| PaypalApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PaypalApiError::RestResponseError(e.to_string()))?;
            Err(PaypalApiError::QueryError { status, message })
        }
    }

    /// Creates a PayPal order with `CAPTURE` intent for a single purchase unit.
    pub async fn create_order(&self, intent: &NewPaymentIntent) -> Result<PaypalOrder, PaypalApiError> {
        let body = CreateOrderRequest::from(intent);
        debug!("💳️ Creating PayPal order for {} {}. {}", intent.amount, intent.currency, intent.description);
        let order = self.rest_query::<PaypalOrder, _>(Method::POST, "/v2/checkout/orders", Some(body)).await?;
        info!("💳️ Created PayPal order {} ({})", order.id, order.status);
        Ok(order)
    }

    /// Captures the payment for an approved PayPal order.
    pub async fn capture_order(&self, order_id: &str) -> Result<PaypalOrder, PaypalApiError> {
        let order_id = order_id.trim();
        // The id becomes a path segment, so only PayPal's id alphabet is allowed through
        if order_id.is_empty() || !order_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(PaypalApiError::RestRequestError(format!("'{order_id}' is not a valid PayPal order id")));
        }
        let path = format!("/v2/checkout/orders/{order_id}/capture");
        debug!("💳️ Capturing PayPal order {order_id}");
        let order = self.rest_query::<PaypalOrder, Value>(Method::POST, &path, Some(Value::Object(Default::default()))).await?;
        info!("💳️ Captured PayPal order {order_id}. Status: {}", order.status);
        Ok(order)
    }
}

impl PaymentProvider for PaypalApi {
    async fn create_intent(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, PaymentProviderError> {
        let order = self.create_order(&intent).await.map_err(|e| {
            warn!("💳️ Could not create PayPal order. {e}");
            PaymentProviderError::from(e)
        })?;
        Ok(order.to_payment_intent())
    }

    async fn capture_intent(&self, intent_id: &str) -> Result<CapturedPayment, PaymentProviderError> {
        let order = self.capture_order(intent_id).await.map_err(|e| {
            warn!("💳️ Could not capture PayPal order {intent_id}. {e}");
            PaymentProviderError::from(e)
        })?;
        let captured = order.to_captured_payment()?;
        Ok(captured)
    }
}
