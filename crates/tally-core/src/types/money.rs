//! Fixed-point monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Decimal places of a cent-denominated currency.
pub const CENT_SCALE: u32 = 2;

/// A signed currency amount.
///
/// Backed by `rust_decimal::Decimal`, so sums and differences are exact;
/// only division (averages) rounds, and only when asked to.
///
/// # Example
///
/// ```rust
/// use tally_core::types::Money;
/// use rust_decimal_macros::dec;
///
/// let total: Money = [Money::new(dec!(0.10)), Money::new(dec!(0.20))].into_iter().sum();
/// assert_eq!(total, Money::new(dec!(0.30)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal amount.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Builds an amount from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_SCALE))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// True for amounts below zero (money leaving an account).
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// True for amounts above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// True for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Addition that reports overflow instead of panicking.
    #[must_use]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Divides by a count and rounds half away from zero to `scale` places.
    ///
    /// Returns `None` for a zero count.
    #[must_use]
    pub fn checked_div_count(self, count: usize, scale: u32) -> Option<Money> {
        if count == 0 {
            return None;
        }
        let quotient = self.0.checked_div(Decimal::from(count))?;
        Some(Money(quotient).round_dp(scale))
    }

    /// Rounds half away from zero to `scale` decimal places.
    #[must_use]
    pub fn round_dp(self, scale: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
