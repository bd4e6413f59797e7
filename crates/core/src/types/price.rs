//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`rust_decimal::Decimal`] in the currency's standard
//! unit (dollars, not cents) and only rounded at display time.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A decimal currency amount.
///
/// The wrapper keeps arithmetic exact: derived amounts (line totals, tax)
/// carry full precision and are only rounded when formatted for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a unit quantity (e.g. a cart line quantity).
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Scale by a decimal rate (e.g. a tax rate).
    #[must_use]
    pub fn scale_by(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    /// Format for display, rounded to cents (e.g. "$19.99").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(amount: &str) -> Price {
        Price::new(amount.parse().expect("valid decimal"))
    }

    #[test]
    fn test_times_and_sum() {
        let subtotal: Price = [price("500").times(2), price("300").times(1)]
            .into_iter()
            .sum();
        assert_eq!(subtotal, price("1300"));
    }

    #[test]
    fn test_scale_by_keeps_precision() {
        let tax = price("1300").scale_by("0.08".parse().expect("valid decimal"));
        assert_eq!(tax, price("104.00"));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(price("19.999").to_string(), "$20.00");
        assert_eq!(price("50").to_string(), "$50.00");
    }

    #[test]
    fn test_ordering() {
        assert!(price("1000.01") > price("1000"));
        assert!(price("999.99") < price("1000"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&price("1499.50")).expect("serialize");
        assert_eq!(json, "\"1499.50\"");
        let back: Price = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, price("1499.50"));
    }
}
