//! Late-payment penalty: simple daily accrual on the overdue amount.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::models::{Money, PenaltyResult, Rate};

pub const ANNUAL_PENALTY_RATE: Rate = Rate::new(dec!(0.10));

pub const DAYS_PER_YEAR: u32 = 365;

/// Penalty on `amount` after `days_overdue` days. Accrual is linear, never
/// compounding, and zero days means zero penalty.
pub fn compute_penalty(
    amount: Money,
    days_overdue: u32,
) -> PenaltyResult {
    let daily_penalty_rate = amount * ANNUAL_PENALTY_RATE / DAYS_PER_YEAR;
    let total_penalty = daily_penalty_rate * days_overdue;

    PenaltyResult {
        daily_penalty_rate,
        total_penalty,
        total_amount_due: amount + total_penalty,
    }
}

/// Whole days elapsed after `due_date` as of `as_of`; zero when not yet late.
pub fn days_overdue(
    due_date: NaiveDate,
    as_of: NaiveDate,
) -> u32 {
    let days = (as_of - due_date).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
