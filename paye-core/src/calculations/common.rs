//! Shared helpers for tax calculations.
//!
//! Rounding and digit grouping here are presentation aids: the evaluators
//! themselves never round intermediate values.

use rust_decimal::Decimal;
use thousands::Separable;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(273.9726)), dec!(273.97));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a decimal with comma thousands separators, dropping trailing
/// fractional zeros.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::group_thousands;
///
/// assert_eq!(group_thousands(dec!(6400000)), "6,400,000");
/// assert_eq!(group_thousands(dec!(1008219.18)), "1,008,219.18");
/// ```
pub fn group_thousands(value: Decimal) -> String {
    value.normalize().separate_with_commas()
}

/// Rounds half-up to two places and groups thousands, keeping both
/// fractional digits.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(13412.5)), "13,412.50");
/// assert_eq!(format_amount(dec!(-273.972602)), "-273.97");
/// ```
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value)).separate_with_commas()
}

/// Trims whitespace and removes comma thousands separators, so `" 1,234.56 "`
/// becomes `"1234.56"`.
pub fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}
