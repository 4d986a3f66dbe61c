//! Statutory deductions and reliefs that reduce gross income to taxable income.

use serde::{Deserialize, Serialize};

use crate::models::Money;
use crate::policy::DeductionPolicy;

/// Amounts subtracted from gross income before the band table is applied.
///
/// Under a given policy only the relevant fields are non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub pension: Money,
    pub housing_fund: Money,
    pub rent_relief: Money,
    pub consolidated_relief: Money,
}

impl Deductions {
    pub fn total(&self) -> Money {
        self.pension + self.housing_fund + self.rent_relief + self.consolidated_relief
    }
}

impl DeductionPolicy {
    /// Computes the deductions this policy grants for an annual gross income
    /// and annual rent. Inputs are not validated.
    pub fn apply(
        &self,
        annual_gross: Money,
        annual_rent: Money,
    ) -> Deductions {
        match *self {
            DeductionPolicy::Statutory {
                pension_rate,
                basic_salary_fraction,
                housing_fund_rate,
                rent_relief_fraction,
                rent_relief_cap,
            } => Deductions {
                pension: annual_gross * pension_rate,
                housing_fund: (annual_gross * basic_salary_fraction) * housing_fund_rate,
                rent_relief: (annual_rent * rent_relief_fraction).min(rent_relief_cap),
                consolidated_relief: Money::ZERO,
            },
            DeductionPolicy::ConsolidatedRelief {
                fixed_allowance,
                gross_rate,
                floor_rate,
            } => Deductions {
                consolidated_relief: (fixed_allowance + annual_gross * gross_rate)
                    .max(annual_gross * floor_rate),
                ..Deductions::default()
            },
        }
    }
}

/// Deductions under the 2026 law: 8% pension, 2.5% housing fund on the
/// assumed 25% basic salary, and 20% of rent capped at 500,000.
pub fn compute_deductions(
    annual_gross: Money,
    annual_rent: Money,
) -> Deductions {
    DeductionPolicy::STATUTORY_2026.apply(annual_gross, annual_rent)
}
