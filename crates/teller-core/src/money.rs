//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  A ledger that deposits 0.10 three times and then withdraws 0.30       │
//! │  must end at exactly zero, not at 5.5e-17.                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 - 30 = 0 cents, always                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use teller_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let typed: Money = "10.99".parse().unwrap();
//! assert_eq!(price, typed);
//! assert_eq!(price.to_string(), "$10.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::SubAssign;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: seed balances may be negative (see
///   [`AccountDirectory::create`](crate::AccountDirectory::create))
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Checked helpers**: deposits use `checked_add` and sale totals use
///   `checked_multiply_quantity`, so overflow is an error, never a wrap
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ATM prompt "50.00" ──► Money::from_str ──► Account::deposit           │
/// │                                                                         │
/// │  Product.price_cents ──► Money ──► × quantity ──► Sale.total_price     │
/// │                                                                         │
/// │  Displayed as "$150.00" by both shells                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use teller_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use teller_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Addition that returns `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use teller_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses user-typed amounts such as `"150"`, `"150.5"`, `"150.50"`, `".75"`
/// or `"-20"`.
///
/// At most two fractional digits are accepted; `"1.005"` is rejected rather
/// than silently rounded. Exponents, `inf` and `nan` are rejected.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (major_str, minor_str) = digits.split_once('.').unwrap_or((digits, ""));

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid("expected a number"));
        }
        if !major_str.chars().chain(minor_str.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number"));
        }
        if minor_str.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("expected a number"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("expected a number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal currency display, e.g. `$150.00` or `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

/// Used by withdrawals, which check `amount <= balance` first.
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-$0.05");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_accepts_common_inputs() {
        assert_eq!("150".parse::<Money>().unwrap().cents(), 15_000);
        assert_eq!("150.0".parse::<Money>().unwrap().cents(), 15_000);
        assert_eq!("150.5".parse::<Money>().unwrap().cents(), 15_050);
        assert_eq!("150.55".parse::<Money>().unwrap().cents(), 15_055);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("7.".parse::<Money>().unwrap().cents(), 700);
        assert_eq!("  42  ".parse::<Money>().unwrap().cents(), 4_200);
        assert_eq!("+3".parse::<Money>().unwrap().cents(), 300);
        assert_eq!("-20.5".parse::<Money>().unwrap().cents(), -2_050);
        assert_eq!("0".parse::<Money>().unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", ".", "-", "abc", "1e3", "inf", "nan", "1,50", "1.2.3", "--1", "1.005"] {
            assert!(input.parse::<Money>().is_err(), "accepted {input:?}");
        }
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(10).checked_add(Money::from_cents(5)),
            Some(Money::from_cents(15))
        );

        let mut balance = Money::from_cents(1_000);
        balance -= Money::from_cents(250);
        assert_eq!(balance, Money::from_cents(750));
    }

    #[test]
    fn test_quantity_overflow_is_none() {
        assert_eq!(
            Money::from_cents(i64::MAX / 2 + 1).checked_multiply_quantity(2),
            None
        );
        assert_eq!(
            Money::from_cents(-299).checked_multiply_quantity(3),
            Some(Money::from_cents(-897))
        );
    }

    #[test]
    fn test_is_positive() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_cents(-100).is_positive());
    }

    /// Integer cents keep repeated small deposits exact.
    #[test]
    fn test_no_float_drift() {
        let dime: Money = "0.10".parse().unwrap();
        let mut total = Money::zero();
        for _ in 0..3 {
            total = total.checked_add(dime).unwrap();
        }
        total -= "0.30".parse::<Money>().unwrap();
        assert_eq!(total, Money::zero());
    }
}
