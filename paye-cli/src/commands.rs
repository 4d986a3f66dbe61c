//! Subcommand arguments and handlers.
//!
//! Each handler returns the rendered report so `main` decides where it goes.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Args};
use paye_core::calculations::{
    MONTHS_PER_YEAR, PaymentPlan, PayrollAggregator, days_overdue, evaluate_policy,
};
use paye_core::{Money, PolicyRegistry, compare_laws, compute_penalty, evaluate_corporate_tax};
use paye_data::{BandTableLoader, PayrollExporter, RosterLoader};
use tracing::info;

use crate::config::AppConfig;
use crate::report;
use crate::utils::parse_money;

/// Code under which a `--bands` table is registered.
pub const CUSTOM_POLICY_CODE: &str = "custom";

fn parse_plan(s: &str) -> Result<PaymentPlan, String> {
    PaymentPlan::parse(s).ok_or_else(|| {
        format!("unknown payment plan '{s}' (expected monthly, quarterly or annual)")
    })
}

fn annualise(
    income: Money,
    monthly: bool,
) -> Money {
    if monthly { income * MONTHS_PER_YEAR } else { income }
}

#[derive(Debug, Args)]
pub struct TaxArgs {
    /// Gross income; annual unless --monthly is given. Commas are allowed.
    #[arg(long, value_parser = parse_money)]
    pub income: Money,

    /// Treat --income as a monthly figure.
    #[arg(long)]
    pub monthly: bool,

    /// Annual rent paid. Defaults to the configured value.
    #[arg(long, value_parser = parse_money)]
    pub rent: Option<Money>,

    /// Law version: 2025/old or 2026/new. Defaults to the configured value.
    #[arg(long)]
    pub law: Option<String>,

    /// CSV band table (lower_bound,upper_bound,rate) replacing the law's bands.
    #[arg(long, value_name = "CSV")]
    pub bands: Option<PathBuf>,
}

pub fn run_tax(
    args: &TaxArgs,
    config: &AppConfig,
) -> Result<String> {
    let mut registry = PolicyRegistry::with_builtin();
    let mut law = args.law.as_deref().unwrap_or(&config.defaults.law);

    if let Some(path) = &args.bands {
        let table = BandTableLoader::load_from_file(path)
            .with_context(|| format!("loading band table '{}'", path.display()))?;
        let custom = registry.get(law)?.with_bands(CUSTOM_POLICY_CODE, table);
        registry.register(custom);
        law = CUSTOM_POLICY_CODE;
    }

    let policy = registry.get(law)?;
    let gross = annualise(args.income, args.monthly);
    let rent = args.rent.unwrap_or(config.defaults.annual_rent);
    let breakdown = evaluate_policy(gross, rent, policy);

    info!(policy = %policy.code, gross = %gross, tax = %breakdown.tax_due, "computed income tax");
    Ok(report::render_breakdown(&policy.code, &breakdown))
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Gross income; annual unless --monthly is given.
    #[arg(long, value_parser = parse_money)]
    pub income: Money,

    #[arg(long)]
    pub monthly: bool,

    /// Annual rent paid. Only the new law grants rent relief.
    #[arg(long, value_parser = parse_money)]
    pub rent: Option<Money>,
}

pub fn run_compare(
    args: &CompareArgs,
    config: &AppConfig,
) -> Result<String> {
    let gross = annualise(args.income, args.monthly);
    let rent = args.rent.unwrap_or(config.defaults.annual_rent);
    let comparison = compare_laws(gross, rent);

    info!(gross = %gross, savings = %comparison.savings, "compared tax laws");
    Ok(report::render_comparison(&comparison))
}

#[derive(Debug, Args)]
pub struct CitArgs {
    /// Annual company turnover.
    #[arg(long, value_parser = parse_money)]
    pub turnover: Money,
}

pub fn run_cit(args: &CitArgs) -> Result<String> {
    let result = evaluate_corporate_tax(args.turnover);
    Ok(report::render_corporate(args.turnover, &result))
}

#[derive(Debug, Args)]
pub struct InstallmentsArgs {
    #[arg(long, value_parser = parse_money)]
    pub annual_tax: Money,

    /// monthly, quarterly or annual (alias one-time). Defaults to the configured plan.
    #[arg(long, value_parser = parse_plan)]
    pub plan: Option<PaymentPlan>,
}

pub fn run_installments(
    args: &InstallmentsArgs,
    config: &AppConfig,
) -> Result<String> {
    let plan = args.plan.unwrap_or(config.defaults.payment_plan);
    Ok(report::render_installments(args.annual_tax, plan))
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("overdue").required(true).args(["days", "due_date"])))]
pub struct PenaltyArgs {
    /// Unpaid tax.
    #[arg(long, value_parser = parse_money)]
    pub amount: Money,

    /// Whole days past the due date.
    #[arg(long)]
    pub days: Option<u32>,

    /// Due date; days overdue are counted up to --as-of.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub due_date: Option<NaiveDate>,

    /// Date to count to. Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD", requires = "due_date")]
    pub as_of: Option<NaiveDate>,
}

impl PenaltyArgs {
    fn days_overdue(&self) -> Result<u32> {
        match (self.days, self.due_date) {
            (Some(days), _) => Ok(days),
            (None, Some(due)) => {
                let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
                Ok(days_overdue(due, as_of))
            }
            (None, None) => bail!("either --days or --due-date is required"),
        }
    }
}

pub fn run_penalty(args: &PenaltyArgs) -> Result<String> {
    let days = args.days_overdue()?;
    let result = compute_penalty(args.amount, days);
    Ok(report::render_penalty(args.amount, days, &result))
}

#[derive(Debug, Args)]
pub struct PayrollArgs {
    /// Roster CSV: Name,NIN,Department,Monthly Salary,Annual Rent.
    #[arg(long, value_name = "CSV")]
    pub roster: PathBuf,

    /// Write the recalculated payroll to this CSV file.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Law version used for the payroll. Defaults to the configured value.
    #[arg(long)]
    pub law: Option<String>,
}

pub fn run_payroll(
    args: &PayrollArgs,
    config: &AppConfig,
) -> Result<String> {
    let registry = PolicyRegistry::with_builtin();
    let policy = registry.get(args.law.as_deref().unwrap_or(&config.defaults.law))?;

    let file = File::open(&args.roster)
        .with_context(|| format!("opening roster '{}'", args.roster.display()))?;
    let import = RosterLoader::parse_with_policy(file, policy)
        .with_context(|| format!("reading roster '{}'", args.roster.display()))?;

    let summary = PayrollAggregator::new(policy).aggregate(&import.employees);
    info!(
        employees = import.employees.len(),
        rejected = import.rejected.len(),
        annual_tax = %summary.totals.annual_tax,
        "processed payroll"
    );

    if let Some(path) = &args.export {
        PayrollExporter::write_to_file(path, &import.employees)
            .with_context(|| format!("exporting payroll to '{}'", path.display()))?;
    }

    Ok(report::render_payroll(&summary, &import.rejected))
}
