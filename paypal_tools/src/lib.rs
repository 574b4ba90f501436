//! A small client for the PayPal Orders v2 REST API.
//!
//! Only the pieces a storefront checkout needs are covered: obtaining an OAuth2 access token, creating an order with
//! `CAPTURE` intent, and capturing an approved order. [`PaypalApi`] implements
//! [`shop_common::PaymentProvider`], so it can be handed straight to the checkout engine.
mod api;
mod config;
mod error;

pub mod data_objects;

pub use api::PaypalApi;
pub use config::{PaypalConfig, PaypalEnvironment};
pub use error::PaypalApiError;
