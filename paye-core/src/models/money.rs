use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// An amount in the jurisdiction's base currency unit.
///
/// Amounts handed to the engine are expected to be non-negative; the engine
/// does not reject negative values but treats them as zero-liability inputs.
/// Differences such as comparison savings can legitimately be negative.
///
/// Arithmetic saturates at the bounds of [`Decimal`] instead of panicking.
/// Front ends reject inputs above [`Money::INPUT_LIMIT`], well below the
/// point where saturation could change a result.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest amount accepted from user input: one quadrillion.
    pub const INPUT_LIMIT: Money = Money(dec!(1000000000000000));

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn within_input_limit(self) -> bool {
        self.0.abs() <= Self::INPUT_LIMIT.0
    }

    /// Rounds to two decimal places, midpoint away from zero.
    ///
    /// Only for presentation; the engine never rounds intermediate values.
    pub fn round_half_up(self) -> Self {
        Self(round_half_up(self.0))
    }

    /// `self / whole` as a fraction, or zero when `whole` is not positive.
    pub fn share_of(
        self,
        whole: Money,
    ) -> Rate {
        if whole.is_positive() {
            Rate(self.0 / whole.0)
        } else {
            Rate::ZERO
        }
    }
}

impl fmt::Display for Money {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(
        self,
        rhs: Money,
    ) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(
        &mut self,
        rhs: Money,
    ) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(
        self,
        rhs: Money,
    ) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(
        &mut self,
        rhs: Money,
    ) {
        *self = *self - rhs;
    }
}

impl Mul<Rate> for Money {
    type Output = Money;

    fn mul(
        self,
        rhs: Rate,
    ) -> Money {
        Money(self.0.saturating_mul(rhs.0))
    }
}

/// Scales by a whole count, e.g. months in a year or days overdue.
impl Mul<u32> for Money {
    type Output = Money;

    fn mul(
        self,
        rhs: u32,
    ) -> Money {
        Money(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

/// Splits into equal parts. Panics when `rhs` is zero, like integer division.
impl Div<u32> for Money {
    type Output = Money;

    fn div(
        self,
        rhs: u32,
    ) -> Money {
        Money(self.0 / Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A rate expressed as a fraction: `0.15` is 15%.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    pub const fn new(fraction: Decimal) -> Self {
        Self(fraction)
    }

    pub const fn fraction(self) -> Decimal {
        self.0
    }

    /// The rate as a percentage, e.g. `15` for `0.15`.
    pub fn as_percent(self) -> Decimal {
        self.0.saturating_mul(Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Rate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}%", self.as_percent().normalize())
    }
}

impl FromStr for Rate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
