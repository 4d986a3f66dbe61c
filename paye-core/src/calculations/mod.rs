//! Tax calculation modules.
//!
//! Every function here is pure: numeric inputs in, value objects out, with no
//! I/O and no shared state.

pub mod common;
pub mod comparison;
pub mod corporate;
pub mod deductions;
pub mod installment;
pub mod payroll;
pub mod penalty;
pub mod progressive;

pub use comparison::compare;
pub use corporate::{CIT_RATE, EXEMPTION_THRESHOLD, evaluate_corporate};
pub use deductions::{Deductions, compute_deductions};
pub use installment::{PaymentPlan, monthly_installment, quarterly_installment};
pub use payroll::{
    DepartmentSummary, EmployeeTaxLine, MONTHS_PER_YEAR, PayrollAggregator, PayrollSummary,
    PayrollTotals, SalaryTier, SalaryTierSummary, evaluate_employee, recalculate_employee,
};
pub use penalty::{ANNUAL_PENALTY_RATE, DAYS_PER_YEAR, compute_penalty, days_overdue};
pub use progressive::{BandEvaluation, evaluate, evaluate_policy};
