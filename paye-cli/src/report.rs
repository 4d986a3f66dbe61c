//! Plain-text rendering of engine results.

use std::fmt::Write;

use paye_core::calculations::common::{format_amount, round_half_up};
use paye_core::calculations::{PaymentPlan, PayrollSummary};
use paye_core::{CorporateTaxResult, Money, PenaltyResult, Rate, TaxBreakdown, TaxComparison};
use paye_data::RejectedRow;

/// `₦1,234.50`, with the sign in front of the currency symbol.
pub fn naira(amount: Money) -> String {
    let formatted = format_amount(amount.amount());
    match formatted.strip_prefix('-') {
        Some(magnitude) => format!("-₦{magnitude}"),
        None => format!("₦{formatted}"),
    }
}

/// A rate as a percentage to two places, e.g. `8.05%`.
pub fn percent(rate: Rate) -> String {
    format!("{:.2}%", round_half_up(rate.as_percent()))
}

fn line(
    out: &mut String,
    label: &str,
    value: impl std::fmt::Display,
) {
    let _ = writeln!(out, "{label:<28}{value:>20}");
}

pub fn render_breakdown(
    policy_code: &str,
    breakdown: &TaxBreakdown,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Personal income tax ({policy_code})");
    line(&mut out, "Gross income", naira(breakdown.gross_income));
    if breakdown.pension_deduction.is_positive() {
        line(&mut out, "  Pension", naira(breakdown.pension_deduction));
    }
    if breakdown.housing_fund_deduction.is_positive() {
        line(&mut out, "  Housing fund", naira(breakdown.housing_fund_deduction));
    }
    if breakdown.rent_relief.is_positive() {
        line(&mut out, "  Rent relief", naira(breakdown.rent_relief));
    }
    if breakdown.consolidated_relief.is_positive() {
        line(&mut out, "  Consolidated relief", naira(breakdown.consolidated_relief));
    }
    line(&mut out, "Taxable income", naira(breakdown.taxable_income));

    if !breakdown.bands.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<26}{:>6}{:>20}{:>16}", "Band", "Rate", "Taxed", "Tax");
        for band in &breakdown.bands {
            let _ = writeln!(
                out,
                "{:<26}{:>6}{:>20}{:>16}",
                band.label,
                band.rate.to_string(),
                naira(band.taxable_amount_in_band),
                naira(band.tax_amount_in_band),
            );
        }
        let _ = writeln!(out);
    }

    line(&mut out, "Annual tax", naira(breakdown.tax_due));
    line(&mut out, "Monthly tax", naira(breakdown.tax_due / 12));
    line(&mut out, "Effective rate", percent(breakdown.effective_rate));
    out
}

pub fn render_comparison(comparison: &TaxComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Old law versus new law");
    line(&mut out, "Tax under old law", naira(comparison.tax_under_old_law));
    line(&mut out, "Tax under new law", naira(comparison.tax_under_new_law));
    let label = if comparison.savings < Money::ZERO {
        "Additional tax"
    } else {
        "Savings"
    };
    line(
        &mut out,
        label,
        format!(
            "{} ({:.2}%)",
            naira(comparison.savings),
            round_half_up(comparison.savings_percent)
        ),
    );
    out
}

pub fn render_corporate(
    turnover: Money,
    result: &CorporateTaxResult,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Company income tax");
    line(&mut out, "Annual turnover", naira(turnover));
    if result.is_exempt {
        line(&mut out, "Status", "exempt (small company)");
    } else {
        line(&mut out, "Rate", percent(result.tax_rate));
    }
    line(&mut out, "Tax due", naira(result.tax_due));
    out
}

pub fn render_installments(
    annual_tax: Money,
    plan: PaymentPlan,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Installment plan ({plan})");
    line(&mut out, "Annual tax", naira(annual_tax));
    line(&mut out, "Payments per year", plan.payments_per_year());
    line(&mut out, "Amount per payment", naira(plan.installment(annual_tax)));
    out
}

pub fn render_penalty(
    amount: Money,
    days_overdue: u32,
    result: &PenaltyResult,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Late payment penalty");
    line(&mut out, "Amount overdue", naira(amount));
    line(&mut out, "Days overdue", days_overdue);
    line(&mut out, "Daily penalty", naira(result.daily_penalty_rate));
    line(&mut out, "Total penalty", naira(result.total_penalty));
    line(&mut out, "Total amount due", naira(result.total_amount_due));
    out
}

pub fn render_payroll(
    summary: &PayrollSummary,
    rejected: &[RejectedRow],
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<10}{:<24}{:<18}{:>9}{:>18}{:>16}",
        "ID", "Name", "Department", "Status", "Monthly salary", "Monthly tax"
    );
    for (id, employee) in &summary.per_employee {
        let _ = writeln!(
            out,
            "{:<10}{:<24}{:<18}{:>9}{:>18}{:>16}",
            id,
            employee.name,
            employee.department.label(),
            employee.status.as_str(),
            naira(employee.monthly_salary),
            naira(employee.tax.monthly_tax),
        );
    }

    let _ = writeln!(out);
    line(&mut out, "Active employees", summary.totals.active_employees);
    line(&mut out, "Total monthly salary", naira(summary.totals.monthly_salary));
    line(&mut out, "Total monthly tax", naira(summary.totals.monthly_tax));
    line(&mut out, "Total annual tax", naira(summary.totals.annual_tax));
    line(&mut out, "Average salary", naira(summary.totals.average_salary));

    let departments = summary.by_department();
    if !departments.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<18}{:>6}{:>18}{:>18}",
            "Department", "Staff", "Average salary", "Monthly cost"
        );
        for department in &departments {
            let _ = writeln!(
                out,
                "{:<18}{:>6}{:>18}{:>18}",
                department.department.label(),
                department.employee_count,
                naira(department.average_salary),
                naira(department.total_monthly_cost),
            );
        }
    }

    let tiers = summary.by_salary_tier();
    if !tiers.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<18}{:>6}{:>18}", "Salary tier", "Staff", "Monthly cost");
        for tier in &tiers {
            let _ = writeln!(
                out,
                "{:<18}{:>6}{:>18}",
                tier.tier.label(),
                tier.employee_count,
                naira(tier.total_monthly_cost),
            );
        }
    }

    if !rejected.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Rejected rows:");
        for row in rejected {
            let _ = writeln!(out, "  row {}: {}", row.row, row.message());
        }
    }

    out
}
