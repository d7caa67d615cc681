//! Prices

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use thiserror::Error;

/// Errors raised while reading a price from catalog data.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The text is not a decimal number.
    #[error("price {0:?} is not a decimal number")]
    Invalid(String),

    /// Prices are never negative.
    #[error("price {0} is negative")]
    Negative(Decimal),
}

/// An exact, non-negative decimal price.
///
/// Prices cross the catalog boundary as text (`"10.00"`) and are kept as a
/// fixed-point [`Decimal`] so cart arithmetic never drifts. The scale of the
/// original text is preserved, so `"10.00"` serializes back as `"10.00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    amount: Decimal,
}

impl Price {
    /// Zero, in the catalog currency.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Creates a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        Ok(Self { amount })
    }

    /// Returns the exact decimal amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the price as money in the catalog currency.
    pub fn to_money(&self) -> Money<'static, Currency> {
        money(self.amount)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|source| PriceError::Invalid(format!("{trimmed} ({source})")))?;

        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.amount, f)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal price as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Price::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Price::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let amount = Decimal::from_f64(v)
            .ok_or_else(|| E::custom(PriceError::Invalid(v.to_string())))?;

        Price::new(amount).map_err(E::custom)
    }
}

/// The currency every catalog price is quoted in.
pub fn currency() -> &'static Currency {
    iso::USD
}

/// Converts an exact amount into money, rounded to whole cents.
pub fn money(amount: Decimal) -> Money<'static, Currency> {
    Money::from_minor(to_minor_units(amount), currency())
}

/// Rounds an amount to whole cents, midpoint away from zero.
///
/// Amounts beyond the range of `i64` cents saturate.
pub fn to_minor_units(amount: Decimal) -> i64 {
    let cents = amount
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    cents.to_i64().unwrap_or(if cents.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Formats an amount for display, e.g. `$20.00`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{}", money(amount))
}
