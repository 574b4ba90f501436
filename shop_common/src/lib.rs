mod helpers;
mod money;

pub mod payments;
mod secret;

pub use helpers::{env_or_default, env_parse_or_default, parse_boolean_flag};
pub use money::{Money, MoneyConversionError, DEFAULT_CURRENCY_CODE};
pub use payments::{CapturedPayment, NewPaymentIntent, PaymentIntent, PaymentProvider, PaymentProviderError};
pub use secret::Secret;
