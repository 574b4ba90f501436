use std::{fmt::Display, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::{
    database::{HasArguments, HasValueRef},
    encode::IsNull,
    error::BoxDynError,
    Decode,
    Encode,
    Sqlite,
    Type,
};
use thiserror::Error;

pub const DEFAULT_CURRENCY_CODE: &str = "USD";

//--------------------------------------       Money         ---------------------------------------------------------
/// A monetary amount in major currency units (e.g. dollars), backed by an exact decimal.
///
/// Serialized as a JSON number, stored as TEXT in SQLite so that no precision is lost on the way through the
/// database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

#[derive(Debug, Clone, Error)]
pub enum MoneyConversionError {
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("Amounts cannot be negative: {0}")]
    NegativeAmount(String),
}

impl Money {
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The amount rounded half-up to two decimal places, formatted the way payment providers expect, e.g. `"19.90"`.
    pub fn to_fixed_2dp(&self) -> String {
        let rounded = self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Money {
    type Err = MoneyConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| MoneyConversionError::InvalidAmount(s.to_string()))?;
        let money = Self(value);
        if money.is_negative() {
            return Err(MoneyConversionError::NegativeAmount(s.to_string()));
        }
        Ok(money)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SQLite has no decimal type, so amounts travel as their canonical string form.
impl Type<Sqlite> for Money {
    fn type_info() -> <Sqlite as sqlx::Database>::TypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &<Sqlite as sqlx::Database>::TypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Money {
    fn encode_by_ref(&self, buf: &mut <Sqlite as HasArguments<'q>>::ArgumentBuffer) -> IsNull {
        <String as Encode<'q, Sqlite>>::encode(self.0.to_string(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Money {
    fn decode(value: <Sqlite as HasValueRef<'r>>::ValueRef) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<'r, Sqlite>>::decode(value)?;
        let value = Decimal::from_str(text)?;
        Ok(Self(value))
    }
}
