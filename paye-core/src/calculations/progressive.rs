//! Marginal (progressive) tax evaluation over a band table.
//!
//! Income is sliced across the bands in ascending order and each slice is
//! taxed only at its own band's rate, so no unit of income is taxed twice.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::evaluate_policy;
//! use paye_core::{LawVersion, Money, TaxPolicy};
//!
//! let policy = TaxPolicy::for_version(LawVersion::Y2026);
//! let breakdown = evaluate_policy(Money::new(dec!(2000000)), Money::ZERO, &policy);
//!
//! assert_eq!(breakdown.taxable_income, Money::new(dec!(1827500)));
//! assert_eq!(breakdown.tax_due, Money::new(dec!(160950)));
//! assert_eq!(breakdown.bands.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BandResult, BandTable, Money, TaxBreakdown};
use crate::policy::TaxPolicy;

/// Tax due on a taxable amount and the bands that contributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandEvaluation {
    pub tax_due: Money,
    pub bands: Vec<BandResult>,
}

/// Applies `table` to `taxable_income`.
///
/// Zero or negative income yields zero tax and no band results; this never
/// fails, since deductions may legitimately exceed a small gross income.
pub fn evaluate(
    taxable_income: Money,
    table: &BandTable,
) -> BandEvaluation {
    let mut remaining = taxable_income;
    let mut tax_due = Money::ZERO;
    let mut bands = Vec::new();

    for band in table.iter() {
        if remaining <= Money::ZERO {
            break;
        }

        let amount_in_band = match band.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax_in_band = amount_in_band * band.rate;

        if amount_in_band.is_positive() {
            bands.push(BandResult {
                label: band.label(),
                rate: band.rate,
                taxable_amount_in_band: amount_in_band,
                tax_amount_in_band: tax_in_band,
            });
        }

        tax_due += tax_in_band;
        remaining -= amount_in_band;
    }

    BandEvaluation { tax_due, bands }
}

/// Evaluates an annual gross income and annual rent under `policy`.
pub fn evaluate_policy(
    annual_gross: Money,
    annual_rent: Money,
    policy: &TaxPolicy,
) -> TaxBreakdown {
    let deductions = policy.deductions.apply(annual_gross, annual_rent);
    let taxable_income = (annual_gross
        - deductions.pension
        - deductions.housing_fund
        - deductions.rent_relief
        - deductions.consolidated_relief)
        .max(Money::ZERO);

    let evaluation = evaluate(taxable_income, &policy.bands);

    debug!(
        policy = %policy.code,
        gross = %annual_gross,
        taxable = %taxable_income,
        tax = %evaluation.tax_due,
        "evaluated income tax"
    );

    TaxBreakdown {
        gross_income: annual_gross,
        pension_deduction: deductions.pension,
        housing_fund_deduction: deductions.housing_fund,
        rent_relief: deductions.rent_relief,
        consolidated_relief: deductions.consolidated_relief,
        taxable_income,
        tax_due: evaluation.tax_due,
        effective_rate: evaluation.tax_due.share_of(annual_gross),
        bands: evaluation.bands,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{LawVersion, Rate};

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    fn new_law() -> TaxPolicy {
        TaxPolicy::for_version(LawVersion::Y2026)
    }

    fn old_law() -> TaxPolicy {
        TaxPolicy::for_version(LawVersion::Y2025)
    }

    fn band_total(evaluation: &BandEvaluation) -> Money {
        evaluation.bands.iter().map(|b| b.tax_amount_in_band).sum()
    }

    // =========================================================================
    // evaluate tests
    // =========================================================================

    #[test]
    fn evaluate_zero_income_returns_no_bands() {
        let result = evaluate(Money::ZERO, &new_law().bands);

        assert_eq!(result.tax_due, Money::ZERO);
        assert!(result.bands.is_empty());
    }

    #[test]
    fn evaluate_negative_income_returns_no_bands() {
        let result = evaluate(money(dec!(-50000)), &new_law().bands);

        assert_eq!(result.tax_due, Money::ZERO);
        assert!(result.bands.is_empty());
    }

    #[test]
    fn evaluate_within_tax_free_band() {
        let result = evaluate(money(dec!(500000)), &new_law().bands);

        assert_eq!(result.tax_due, Money::ZERO);
        assert_eq!(result.bands.len(), 1);
        assert_eq!(result.bands[0].taxable_amount_in_band, money(dec!(500000)));
        assert_eq!(result.bands[0].rate, Rate::ZERO);
    }

    #[test]
    fn evaluate_exactly_at_band_edge_stops_at_that_band() {
        let result = evaluate(money(dec!(800000)), &new_law().bands);

        assert_eq!(result.tax_due, Money::ZERO);
        assert_eq!(result.bands.len(), 1);
        assert_eq!(result.bands[0].label, "0 - 800,000");
    }

    #[test]
    fn evaluate_slices_income_across_bands() {
        let result = evaluate(money(dec!(1827500)), &new_law().bands);

        assert_eq!(
            result.bands,
            vec![
                BandResult {
                    label: "0 - 800,000".to_string(),
                    rate: Rate::ZERO,
                    taxable_amount_in_band: money(dec!(800000)),
                    tax_amount_in_band: Money::ZERO,
                },
                BandResult {
                    label: "800,000 - 1,600,000".to_string(),
                    rate: Rate::new(dec!(0.15)),
                    taxable_amount_in_band: money(dec!(800000)),
                    tax_amount_in_band: money(dec!(120000)),
                },
                BandResult {
                    label: "1,600,000 - 3,200,000".to_string(),
                    rate: Rate::new(dec!(0.18)),
                    taxable_amount_in_band: money(dec!(227500)),
                    tax_amount_in_band: money(dec!(40950)),
                },
            ]
        );
        assert_eq!(result.tax_due, money(dec!(160950)));
    }

    #[test]
    fn evaluate_reaches_unbounded_top_band() {
        let result = evaluate(money(dec!(10000000)), &new_law().bands);

        // 0 + 120,000 + 288,000 + 672,000 + 3,600,000 * 0.25
        assert_eq!(result.tax_due, money(dec!(1980000)));
        assert_eq!(result.bands.len(), 5);
        assert_eq!(result.bands[4].label, "Above 6,400,000");
        assert_eq!(result.bands[4].taxable_amount_in_band, money(dec!(3600000)));
    }

    #[test]
    fn evaluate_band_taxes_sum_to_total() {
        for income in [
            dec!(1),
            dec!(799999.99),
            dec!(1600000.01),
            dec!(3333333.33),
            dec!(6400000),
            dec!(123456789.12),
        ] {
            let result = evaluate(money(income), &new_law().bands);

            assert_eq!(band_total(&result), result.tax_due, "income {}", income);
        }
    }

    #[test]
    fn evaluate_never_taxes_more_income_than_given() {
        for income in [dec!(1), dec!(1600000), dec!(2750000.50), dec!(50000000)] {
            let result = evaluate(money(income), &old_law().bands);
            let sliced: Money = result.bands.iter().map(|b| b.taxable_amount_in_band).sum();

            assert_eq!(sliced, money(income), "income {}", income);
        }
    }

    #[test]
    fn evaluate_is_monotonic() {
        let bands = new_law().bands;
        let mut previous = Money::ZERO;

        for step in 0..60u32 {
            let income = money(Decimal::from(step) * dec!(250000));
            let tax = evaluate(income, &bands).tax_due;

            assert!(tax >= previous, "tax fell at income {}", income);
            previous = tax;
        }
    }

    #[test]
    fn evaluate_is_continuous_at_band_edges() {
        let bands = new_law().bands;
        let epsilon = dec!(0.01);

        for edge in [dec!(800000), dec!(1600000), dec!(3200000), dec!(6400000)] {
            let below = evaluate(money(edge - epsilon), &bands).tax_due;
            let above = evaluate(money(edge + epsilon), &bands).tax_due;
            let lower_rate = bands.band_for(money(edge - epsilon)).unwrap().rate;
            let upper_rate = bands.band_for(money(edge + epsilon)).unwrap().rate;

            let expected_jump = money(epsilon) * lower_rate + money(epsilon) * upper_rate;
            assert_eq!(above - below, expected_jump, "edge {}", edge);
        }
    }

    #[test]
    fn evaluate_is_deterministic() {
        let bands = new_law().bands;

        let first = evaluate(money(dec!(4567890.12)), &bands);
        let second = evaluate(money(dec!(4567890.12)), &bands);

        assert_eq!(first, second);
    }

    // =========================================================================
    // evaluate_policy tests
    // =========================================================================

    #[test]
    fn evaluate_policy_new_law_scenario() {
        let result = evaluate_policy(money(dec!(2000000)), Money::ZERO, &new_law());

        assert_eq!(result.gross_income, money(dec!(2000000)));
        assert_eq!(result.pension_deduction, money(dec!(160000)));
        assert_eq!(result.housing_fund_deduction, money(dec!(12500)));
        assert_eq!(result.rent_relief, Money::ZERO);
        assert_eq!(result.consolidated_relief, Money::ZERO);
        assert_eq!(result.taxable_income, money(dec!(1827500)));
        assert_eq!(result.tax_due, money(dec!(160950)));
        assert_eq!(result.effective_rate, Rate::new(dec!(0.080475)));
    }

    #[test]
    fn evaluate_policy_applies_rent_relief() {
        let result = evaluate_policy(money(dec!(2000000)), money(dec!(600000)), &new_law());

        // taxable = 2,000,000 - 160,000 - 12,500 - 120,000 = 1,707,500
        assert_eq!(result.taxable_income, money(dec!(1707500)));
        // 120,000 + 107,500 * 0.18
        assert_eq!(result.tax_due, money(dec!(139350)));
    }

    #[test]
    fn evaluate_policy_old_law_scenario() {
        let result = evaluate_policy(money(dec!(2000000)), Money::ZERO, &old_law());

        assert_eq!(result.consolidated_relief, money(dec!(600000)));
        assert_eq!(result.pension_deduction, Money::ZERO);
        assert_eq!(result.taxable_income, money(dec!(1400000)));
        // 21,000 + 33,000 + 75,000 + 57,000
        assert_eq!(result.tax_due, money(dec!(186000)));
        assert_eq!(result.bands.len(), 4);
    }

    #[test]
    fn evaluate_policy_floors_taxable_income_at_zero() {
        let result = evaluate_policy(money(dec!(150000)), Money::ZERO, &old_law());

        assert_eq!(result.taxable_income, Money::ZERO);
        assert_eq!(result.tax_due, Money::ZERO);
        assert!(result.bands.is_empty());
    }

    #[test]
    fn evaluate_policy_zero_income_has_zero_effective_rate() {
        let result = evaluate_policy(Money::ZERO, Money::ZERO, &new_law());

        assert_eq!(result.tax_due, Money::ZERO);
        assert_eq!(result.effective_rate, Rate::ZERO);
    }

    #[test]
    fn evaluate_policy_taxable_income_matches_deductions() {
        let result = evaluate_policy(money(dec!(7350000)), money(dec!(1200000)), &new_law());

        assert_eq!(
            result.taxable_income,
            result.gross_income - result.total_deductions()
        );
    }
}
