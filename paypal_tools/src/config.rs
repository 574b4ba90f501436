use std::{fmt::Display, str::FromStr, time::Duration};

use log::*;
use shop_common::{env_parse_or_default, Secret};

const SANDBOX_API_URL: &str = "https://api-m.sandbox.paypal.com";
const LIVE_API_URL: &str = "https://api-m.paypal.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaypalEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl PaypalEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_URL,
            Self::Live => LIVE_API_URL,
        }
    }
}

impl FromStr for PaypalEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" | "production" => Ok(Self::Live),
            other => Err(format!("'{other}' is not a PayPal environment. Use 'sandbox' or 'live'.")),
        }
    }
}

impl Display for PaypalEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Live => f.write_str("live"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaypalConfig {
    pub environment: PaypalEnvironment,
    /// Overrides the environment's base URL. Handy for pointing the client at a local stub.
    pub api_url: Option<String>,
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub timeout: Duration,
}

impl Default for PaypalConfig {
    fn default() -> Self {
        Self {
            environment: PaypalEnvironment::default(),
            api_url: None,
            client_id: String::default(),
            client_secret: Secret::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PaypalConfig {
    pub fn new_from_env_or_default() -> Self {
        let environment = std::env::var("SHOP_PAYPAL_ENVIRONMENT")
            .map_err(|_| info!("💳️ SHOP_PAYPAL_ENVIRONMENT not set, using the sandbox"))
            .and_then(|s| s.parse::<PaypalEnvironment>().map_err(|e| warn!("💳️ {e} Using the sandbox.")))
            .unwrap_or_default();
        let api_url = std::env::var("SHOP_PAYPAL_API_URL").ok().filter(|s| !s.trim().is_empty());
        let client_id = std::env::var("SHOP_PAYPAL_CLIENT_ID").unwrap_or_else(|_| {
            error!("💳️ SHOP_PAYPAL_CLIENT_ID is not set. Checkout requests will fail until it is.");
            String::default()
        });
        let client_secret = Secret::new(std::env::var("SHOP_PAYPAL_CLIENT_SECRET").unwrap_or_else(|_| {
            error!("💳️ SHOP_PAYPAL_CLIENT_SECRET is not set. Checkout requests will fail until it is.");
            String::default()
        }));
        let timeout = Duration::from_secs(env_parse_or_default("SHOP_PAYPAL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));
        Self { environment, api_url, client_id, client_secret, timeout }
    }

    pub fn base_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or_else(|| self.environment.base_url()).trim_end_matches('/')
    }
}
