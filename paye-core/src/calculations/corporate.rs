//! Company income tax on annual turnover.
//!
//! The tax base is turnover, not profit. Businesses at or below the exemption
//! threshold pay nothing; above it the whole turnover is taxed at a flat rate.

use rust_decimal_macros::dec;
use tracing::debug;

use crate::models::{CorporateTaxResult, Money, Rate};

/// Turnover at or below which a business is exempt.
pub const EXEMPTION_THRESHOLD: Money = Money::new(dec!(100000000));

pub const CIT_RATE: Rate = Rate::new(dec!(0.30));

pub fn evaluate_corporate(annual_turnover: Money) -> CorporateTaxResult {
    if annual_turnover <= EXEMPTION_THRESHOLD {
        debug!(turnover = %annual_turnover, "turnover within exemption threshold");
        return CorporateTaxResult {
            is_exempt: true,
            tax_rate: Rate::ZERO,
            tax_due: Money::ZERO,
        };
    }

    CorporateTaxResult {
        is_exempt: false,
        tax_rate: CIT_RATE,
        tax_due: annual_turnover * CIT_RATE,
    }
}
