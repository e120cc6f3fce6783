//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are quoted in the shop's single currency (Guatemalan quetzal).
//! The backend sends amounts either as JSON numbers or as decimal strings;
//! both are accepted. Prices always serialize as JSON numbers, which is what
//! the checkout endpoint expects.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error validating a price.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),
}

/// A monetary amount. Never negative when decoded.
///
/// Arithmetic is checked: sums and products that don't fit return `None`
/// rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// `self × quantity`.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_from(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_accepts_number_and_string() {
        let from_number: Price = serde_json::from_str("45000").unwrap();
        let from_string: Price = serde_json::from_str("\"45000.00\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, Price::from_units(45_000));
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(Price::from_units(120)).unwrap();
        assert!(json.is_number());
        assert_eq!(json.as_f64(), Some(120.0));
    }

    #[test]
    fn test_price_arithmetic() {
        let unit = Price::from_units(120);
        assert_eq!(unit.checked_mul(5), Some(Price::from_units(600)));
        assert_eq!(
            unit.checked_add(Price::from_units(15)),
            Some(Price::from_units(135))
        );
    }

    #[test]
    fn test_price_arithmetic_overflow() {
        let huge: Price = serde_json::from_str("\"50000000000000000000\"").unwrap();
        assert_eq!(huge.checked_mul(4_000_000_000), None);
        assert_eq!(Price::MAX.checked_add(Price::from_units(1)), None);
        assert_eq!(Price::MAX.checked_mul(1), Some(Price::MAX));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_units(45_000).to_string(), "Q45000.00");
    }

    #[test]
    fn test_price_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
        assert!(serde_json::from_str::<Price>("\"-0.01\"").is_err());
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
        assert!(matches!(
            Price::try_from(Decimal::new(-5, 0)),
            Err(PriceError::Negative(_))
        ));
        assert_eq!(
            serde_json::from_str::<Price>("\"12.5\"").unwrap(),
            Price::new(Decimal::new(125, 1))
        );
        assert_eq!(serde_json::from_str::<Price>("0").unwrap(), Price::ZERO);
    }
}
