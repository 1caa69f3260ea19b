//! Exact decimal prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Invalid decimal: {0}")]
    Invalid(String),

    #[error("Negative price: {0}")]
    Negative(String),
}

/// Non-negative USD price.
///
/// Prices are kept as exact decimals so that the value read back from the
/// store compares equal to the value fetched from the API. Equality is
/// numeric: `1.50` and `1.5` are the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Wrap a decimal, rejecting negative values.
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.is_zero() {
            return Ok(Self::ZERO);
        }
        if value.is_sign_negative() {
            return Err(PriceError::Negative(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parse a price from plain or scientific notation.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        let value = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(value)
    }

    #[inline]
    pub fn value(self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Stored as a decimal string so no precision is lost in JSON.
impl Serialize for Price {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Price::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_parse_plain_decimal() {
        let price = Price::parse("0.0001234").unwrap();
        assert_eq!(price.to_string(), "0.0001234");
    }

    #[test]
    fn test_parse_scientific() {
        let price = Price::parse("1.5e-5").unwrap();
        assert_eq!(price, Price::parse("0.000015").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            Price::parse("abc"),
            Err(PriceError::Invalid("abc".to_string()))
        );
        assert!(Price::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(Price::parse("-1.0"), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let price = Price::parse("-0").unwrap();
        assert!(price.is_zero());
    }

    #[test]
    fn test_equality_is_numeric() {
        assert_eq!(Price::parse("1.50").unwrap(), Price::parse("1.5").unwrap());
        assert_ne!(Price::parse("1.5").unwrap(), Price::parse("1.51").unwrap());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Price::default(), Price::ZERO);
        assert!(Price::ZERO.is_zero());
    }

    #[test]
    fn test_serde_as_string() {
        let price = Price::new(Decimal::from_f64(2.25).unwrap()).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"2.25\"");
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
