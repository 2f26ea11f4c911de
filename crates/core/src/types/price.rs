//! Type-safe price representation using decimal arithmetic.
//!
//! Persisted collections store prices as plain JSON numbers, so [`Price`]
//! serializes through `rust_decimal`'s float adapter while all arithmetic
//! (line totals, cart totals) stays in `Decimal`.
//!
//! The JSON form goes through `f64`, which keeps about 15 significant
//! digits. Amounts beyond that (far above any real price) come back rounded
//! after a persist/hydrate cycle.
//!
//! Arithmetic saturates at `Decimal::MAX` instead of panicking, so an absurd
//! stored price or quantity yields a capped total rather than a crash.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-currency-tagged price in the store's standard unit (e.g. dollars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the price is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
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

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::from_cents(1050);
        assert_eq!(serde_json::to_value(price).unwrap(), serde_json::json!(10.5));
    }

    #[test]
    fn test_price_deserializes_from_number() {
        let price: Price = serde_json::from_str("12").unwrap();
        assert_eq!(price, Price::from_cents(1200));

        let price: Price = serde_json::from_str("2.25").unwrap();
        assert_eq!(price, Price::from_cents(225));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_cents(250).times(2), Price::from_cents(100)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(600));
    }

    #[test]
    fn test_times_saturates_instead_of_overflowing() {
        let huge = Price::new(Decimal::from_str_exact("70000000000000000000000000000").unwrap());
        assert_eq!(huge.times(2), Price::new(Decimal::MAX));
        assert_eq!(Price::from_cents(1).times(u32::MAX), Price::from_cents(i64::from(u32::MAX)));
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let max = Price::new(Decimal::MAX);
        let total: Price = [max, Price::from_cents(100), max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_json_round_trip_keeps_cents_but_not_extreme_precision() {
        let everyday = Price::from_cents(123_456_789);
        let back: Price = serde_json::from_str(&serde_json::to_string(&everyday).unwrap()).unwrap();
        assert_eq!(back, everyday);

        let extreme = Price::new(Decimal::from_str_exact("12345678901234567.89").unwrap());
        let back: Price = serde_json::from_str(&serde_json::to_string(&extreme).unwrap()).unwrap();
        assert_ne!(back, extreme);
    }

    #[test]
    fn test_negative() {
        assert!(Price::from_cents(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99");
    }
}
