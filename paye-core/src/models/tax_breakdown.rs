use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BandResult, Money, Rate};

/// Full result of evaluating one gross income under one tax policy.
///
/// A value object: built once per evaluation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gross_income: Money,

    /// Pension contribution (2026 law only).
    pub pension_deduction: Money,

    /// Housing-fund contribution (2026 law only).
    pub housing_fund_deduction: Money,

    /// Capped rent relief (2026 law only).
    pub rent_relief: Money,

    /// Consolidated relief allowance (pre-2026 law only).
    pub consolidated_relief: Money,

    /// Gross income minus all deductions and reliefs, floored at zero.
    pub taxable_income: Money,

    /// Sum of `tax_amount_in_band` over `bands`.
    pub tax_due: Money,

    /// `tax_due / gross_income` as a fraction, zero for zero income.
    pub effective_rate: Rate,

    /// Bands that received a strictly positive slice of income, ascending.
    pub bands: Vec<BandResult>,
}

impl TaxBreakdown {
    pub fn total_deductions(&self) -> Money {
        self.pension_deduction
            + self.housing_fund_deduction
            + self.rent_relief
            + self.consolidated_relief
    }
}

/// Old-law versus new-law liability for the same income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComparison {
    pub tax_under_old_law: Money,
    pub tax_under_new_law: Money,

    /// `tax_under_old_law - tax_under_new_law`; negative when the new law costs more.
    pub savings: Money,

    /// Savings as a percentage of the old-law tax, zero when that tax is zero.
    pub savings_percent: Decimal,
}

impl TaxComparison {
    pub fn new(
        tax_under_old_law: Money,
        tax_under_new_law: Money,
    ) -> Self {
        let savings = tax_under_old_law - tax_under_new_law;
        let savings_percent = savings.share_of(tax_under_old_law).as_percent();

        Self {
            tax_under_old_law,
            tax_under_new_law,
            savings,
            savings_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxResult {
    pub is_exempt: bool,
    pub tax_rate: Rate,
    pub tax_due: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyResult {
    /// Penalty accrued per day overdue.
    pub daily_penalty_rate: Money,
    pub total_penalty: Money,
    pub total_amount_due: Money,
}
