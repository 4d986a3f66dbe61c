//! Progressive income-tax engine for the 2025 and 2026 PAYE laws.
//!
//! The crate root exposes the entry points the surrounding application calls
//! with raw amounts; [`calculations`] and [`policy`] hold the building blocks.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::{compare_laws, evaluate_new_law_tax, Money};
//!
//! let breakdown = evaluate_new_law_tax(Money::new(dec!(2000000)), Money::ZERO);
//! assert_eq!(breakdown.tax_due, Money::new(dec!(160950)));
//!
//! let comparison = compare_laws(Money::new(dec!(2000000)), Money::ZERO);
//! assert_eq!(comparison.savings, Money::new(dec!(25050)));
//! ```

pub mod calculations;
pub mod models;
pub mod policy;

pub use calculations::PaymentPlan;
pub use models::*;
pub use policy::{DeductionPolicy, PolicyError, PolicyRegistry, TaxPolicy};

/// Tax under the current (2026) law, with the full breakdown.
pub fn evaluate_new_law_tax(
    annual_gross: Money,
    annual_rent: Money,
) -> TaxBreakdown {
    calculations::evaluate_policy(
        annual_gross,
        annual_rent,
        &TaxPolicy::for_version(LawVersion::Y2026),
    )
}

/// Tax under the pre-2026 law. Rent plays no part in that regime.
pub fn evaluate_old_law_tax(annual_gross: Money) -> Money {
    calculations::evaluate_policy(
        annual_gross,
        Money::ZERO,
        &TaxPolicy::for_version(LawVersion::Y2025),
    )
    .tax_due
}

pub fn compare_laws(
    annual_gross: Money,
    annual_rent: Money,
) -> TaxComparison {
    calculations::compare(
        annual_gross,
        annual_rent,
        &TaxPolicy::for_version(LawVersion::Y2025),
        &TaxPolicy::for_version(LawVersion::Y2026),
    )
}

pub fn evaluate_corporate_tax(annual_turnover: Money) -> CorporateTaxResult {
    calculations::evaluate_corporate(annual_turnover)
}

pub fn monthly_installment(annual_tax: Money) -> Money {
    calculations::monthly_installment(annual_tax)
}

pub fn quarterly_installment(annual_tax: Money) -> Money {
    calculations::quarterly_installment(annual_tax)
}

pub fn compute_penalty(
    amount: Money,
    days_overdue: u32,
) -> PenaltyResult {
    calculations::compute_penalty(amount, days_overdue)
}

/// Monthly and annual PAYE for one employee under the current law.
pub fn recalculate_employee(
    monthly_salary: Money,
    annual_rent: Money,
) -> EmployeeTax {
    calculations::recalculate_employee(monthly_salary, annual_rent)
}
