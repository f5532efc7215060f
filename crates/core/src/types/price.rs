//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are amounts in the store's single base currency with two decimal
//! places. Negative prices are unrepresentable.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// A floating point amount was NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A non-negative price in the base currency, rounded to cents.
///
/// Serializes as a decimal string (`"19.99"`); deserializes from a string or
/// a JSON number and re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Number of decimal places kept.
    pub const SCALE: u32 = 2;

    /// Create a price, rounding to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount.round_dp(Self::SCALE)))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    /// Create a price from a floating point amount, as stored by document
    /// databases that have no decimal type.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotFinite` for NaN/infinity and
    /// `PriceError::Negative` for negative amounts.
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        use rust_decimal::prelude::FromPrimitive;

        let decimal = Decimal::from_f64(amount).ok_or(PriceError::NotFinite)?;
        Self::new(decimal)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_rounds_to_cents() {
        let price = Price::new(dec("19.999")).unwrap();
        assert_eq!(price.amount(), dec("20.00"));
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(dec("-0.01")),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Price::from_f64(49.99).unwrap().amount(), dec("49.99"));
        assert_eq!(Price::from_f64(f64::NAN), Err(PriceError::NotFinite));
        assert!(Price::from_f64(-3.0).is_err());
    }

    #[test]
    fn test_times() {
        let price = Price::from_cents(1250);
        assert_eq!(price.times(5), dec("62.50"));
    }

    #[test]
    fn test_times_saturates() {
        let price = Price::new(dec("100000000000000000000")).unwrap();
        assert_eq!(price.times(u32::MAX), Decimal::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(500).to_string(), "$5.00");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("12.5").unwrap();
        let from_string: Price = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(from_number, from_string);

        assert!(serde_json::from_str::<Price>("-1").is_err());
    }
}
