//! # Money
//!
//! A lightweight newtype for currency amounts. The engine works in a single
//! currency, so there is no currency code, only whole-unit rounding at the
//! presentation edge.
//!
//! Amounts stay unrounded through every intermediate step (cost, base price,
//! discount, aggregation). Call [`Money::rounded`] or format with `{}` only
//! when showing a figure to a person.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::money::Money;
//!
//! let cost = Money(2_197_500.0);
//! let price = cost / 0.6;
//! assert_eq!(price.rounded(), 3_662_500);
//! assert_eq!(price.to_string(), "3,662,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// An amount of currency, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub f64);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(0.0);

    /// Create from raw f64 value
    pub fn new(value: f64) -> Self {
        Money(value)
    }

    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Round to whole currency units (half away from zero).
    pub fn rounded(self) -> i64 {
        self.0.round() as i64
    }

    /// Ratio of this amount to another; zero when `other` is zero.
    pub fn ratio(self, other: Money) -> f64 {
        if other.0 == 0.0 {
            0.0
        } else {
            self.0 / other.0
        }
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Mul<f64> for Money {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Money(self.0 * rhs)
    }
}

impl Div<f64> for Money {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Money(self.0 / rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

/// Whole units with thousands separators, e.g. `1,234,567` or `-42`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.rounded();
        let digits = whole.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if whole < 0 {
            grouped.insert(0, '-');
        }
        f.pad(&grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Money(1000.0);
        let b = Money(250.0);
        assert_eq!((a + b).0, 1250.0);
        assert_eq!((a - b).0, 750.0);
        assert_eq!((a * 2.0).0, 2000.0);
        assert_eq!((a / 4.0).0, 250.0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money(1.5), Money(2.5), Money(6.0)].iter().sum();
        assert_eq!(total, Money(10.0));
    }

    #[test]
    fn test_rounding_only_at_presentation() {
        // Three thirds aggregate to one whole unit when left unrounded
        let third = Money(1.0) / 3.0;
        let total: Money = vec![third, third, third].into_iter().sum();
        assert_eq!(total.rounded(), 1);
        assert_eq!(third.rounded() * 3, 0);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money(0.0).to_string(), "0");
        assert_eq!(Money(999.4).to_string(), "999");
        assert_eq!(Money(1000.0).to_string(), "1,000");
        assert_eq!(Money(3_662_500.0).to_string(), "3,662,500");
        assert_eq!(Money(-12_345.6).to_string(), "-12,346");
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("{:>8}", Money(1500.0)), "   1,500");
    }

    #[test]
    fn test_ratio_of_zero() {
        assert_eq!(Money(5.0).ratio(Money::ZERO), 0.0);
        assert_eq!(Money(5.0).ratio(Money(10.0)), 0.5);
    }

    #[test]
    fn test_serialization() {
        let m = Money(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");
        let roundtrip: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
