use std::env;

use log::*;
use paypal_tools::PaypalConfig;
use shop_common::{env_or_default, parse_boolean_flag, DEFAULT_CURRENCY_CODE};
use shop_engine::checkout_objects::CheckoutOptions;

const DEFAULT_SHOP_HOST: &str = "127.0.0.1";
const DEFAULT_SHOP_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/shop_store.db";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:5000";
const DEFAULT_SUCCESS_REDIRECT: &str = "/frontend/checkout-success.html";
const DEFAULT_FAILURE_REDIRECT: &str = "/frontend/checkout-failed.html";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// If true, the database schema is brought up to date when the server starts.
    pub run_migrations: bool,
    /// The externally visible base URL of this server. PayPal sends buyers back to `{public_url}/payment/success` and
    /// `{public_url}/payment/cancel`.
    pub public_url: String,
    pub redirects: RedirectTargets,
    /// The currency every price in the catalog is quoted in.
    pub currency: String,
    pub paypal: PaypalConfig,
}

/// Where buyers are sent once a redirect-driven checkout is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectTargets {
    pub success: String,
    pub failure: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self { success: DEFAULT_SUCCESS_REDIRECT.to_string(), failure: DEFAULT_FAILURE_REDIRECT.to_string() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SHOP_HOST.to_string(),
            port: DEFAULT_SHOP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            run_migrations: true,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            redirects: RedirectTargets::default(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            paypal: PaypalConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SHOP_HOST").ok().unwrap_or_else(|| DEFAULT_SHOP_HOST.into());
        let port = env::var("SHOP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SHOP_PORT. {e} Using the default, {DEFAULT_SHOP_PORT}, instead."
                    );
                    DEFAULT_SHOP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SHOP_PORT);
        let database_url = env::var("SHOP_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ SHOP_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let run_migrations = parse_boolean_flag(env::var("SHOP_RUN_MIGRATIONS").ok(), true);
        let public_url = env_or_default("SHOP_PUBLIC_URL", DEFAULT_PUBLIC_URL);
        let redirects = RedirectTargets {
            success: env_or_default("SHOP_SUCCESS_REDIRECT", DEFAULT_SUCCESS_REDIRECT),
            failure: env_or_default("SHOP_FAILURE_REDIRECT", DEFAULT_FAILURE_REDIRECT),
        };
        let currency = env::var("SHOP_CURRENCY")
            .ok()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic()))
            .unwrap_or_else(|| {
                info!("🪛️ SHOP_CURRENCY is not set or is not a 3-letter currency code. Using {DEFAULT_CURRENCY_CODE}.");
                DEFAULT_CURRENCY_CODE.to_string()
            });
        let paypal = PaypalConfig::new_from_env_or_default();
        Self { host, port, database_url, run_migrations, public_url, redirects, currency, paypal }
    }

    /// The settings the checkout flow needs, derived from this configuration.
    pub fn checkout_options(&self) -> CheckoutOptions {
        CheckoutOptions::for_public_url(&self.public_url, &self.currency)
    }
}
