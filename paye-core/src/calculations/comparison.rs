//! Year-over-year comparison of the same income under two law versions.

use crate::calculations::progressive::evaluate_policy;
use crate::models::{Money, TaxComparison};
use crate::policy::TaxPolicy;

/// Evaluates `annual_gross` and `annual_rent` under both policies and returns
/// the difference. The two evaluations are independent of each other.
pub fn compare(
    annual_gross: Money,
    annual_rent: Money,
    old_law: &TaxPolicy,
    new_law: &TaxPolicy,
) -> TaxComparison {
    let old_tax = evaluate_policy(annual_gross, annual_rent, old_law).tax_due;
    let new_tax = evaluate_policy(annual_gross, annual_rent, new_law).tax_due;

    TaxComparison::new(old_tax, new_tax)
}
