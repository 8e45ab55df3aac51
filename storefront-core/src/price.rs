//! Monetary amounts held as integer cents.
//!
//! The catalog endpoint sends prices as JSON decimals (`299.99`). They are
//! rounded to the nearest cent on the way in so that sorting and cart totals
//! never touch floating point.

use num_traits::cast::cast;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A non-negative price in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub const ZERO: Self = Self { cents: 0 };

    /// Build a price from whole cents. Negative input clamps to zero.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self {
            cents: if cents < 0 { 0 } else { cents },
        }
    }

    /// Convert a decimal amount (dollars) into a price, rounding to the nearest cent.
    ///
    /// Returns `None` for negative or non-finite amounts.
    #[must_use]
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = round_f64_to_i64(amount * 100.0)?;
        Some(Self { cents })
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// The amount in dollars, allowing precision loss in this one place.
    #[must_use]
    pub fn as_decimal(self) -> f64 {
        cast::<i64, f64>(self.cents).unwrap_or(0.0) / 100.0
    }

    /// Multiply by a line quantity, saturating on overflow.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }

    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            cents: self.cents.saturating_add(other.cents),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Self::from_decimal(amount).ok_or_else(|| {
            serde::de::Error::custom(format!("price must be a non-negative number, got {amount}"))
        })
    }
}

/// Round a f64 and convert to i64, returning `None` outside the i64 range.
fn round_f64_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    cast::<f64, i64>(value.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_amounts_round_to_cents() {
        assert_eq!(Price::from_decimal(299.99).map(Price::cents), Some(29_999));
        assert_eq!(Price::from_decimal(0.005).map(Price::cents), Some(1));
        assert_eq!(Price::from_decimal(999.0).map(Price::cents), Some(99_900));
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(Price::from_decimal(-0.01).is_none());
        assert!(Price::from_decimal(f64::NAN).is_none());
        assert!(Price::from_decimal(f64::INFINITY).is_none());
        assert_eq!(Price::from_cents(-50), Price::ZERO);
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Price::from_cents(129_900).to_string(), "$1299.00");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn deserializes_from_json_numbers() {
        let price: Price = serde_json::from_str("49.99").unwrap();
        assert_eq!(price.cents(), 4_999);
        let err = serde_json::from_str::<Price>("-3").unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn line_math_saturates() {
        let unit = Price::from_cents(i64::MAX / 2 + 1);
        assert_eq!(unit.times(2).cents(), i64::MAX);
        assert_eq!(Price::from_cents(250).times(3).cents(), 750);
    }
}
