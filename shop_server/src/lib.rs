//! # Storefront server
//! This crate hosts the HTTP surface of the storefront. It is responsible for:
//! * Serving the product catalog.
//! * Running the PayPal checkout, both from client calls and from PayPal's redirects.
//! * Listing completed orders.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/products`, `/products/{id}`: The catalog.
//! * `/payment/create-order`, `/payment/capture-order`: The client-driven checkout.
//! * `/payment/success`, `/payment/cancel`: Where PayPal sends the buyer back to.
//! * `/payment/orders`: Every completed order, with its product.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;
