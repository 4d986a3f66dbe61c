use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use paye_cli::commands::{
    CitArgs, CompareArgs, InstallmentsArgs, PayrollArgs, PenaltyArgs, TaxArgs, run_cit,
    run_compare, run_installments, run_payroll, run_penalty, run_tax,
};
use paye_cli::config::AppConfig;
use paye_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// PAYE tax calculator for the 2025 and 2026 Nigerian tax laws.
///
/// Computes personal income tax with a band-by-band breakdown, compares the
/// two laws, and handles company tax, installments, late-payment penalties
/// and whole-payroll runs from a CSV roster.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
struct Cli {
    /// Configuration file. Defaults to ./paye.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive; overrides the config file and RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Personal income tax with deductions and band breakdown.
    Tax(TaxArgs),

    /// Tax under the old and new law side by side.
    Compare(CompareArgs),

    /// Company income tax on annual turnover.
    Cit(CitArgs),

    /// Split an annual liability into equal payments.
    Installments(InstallmentsArgs),

    /// Penalty on tax paid late.
    Penalty(PenaltyArgs),

    /// Tax for every employee in a roster CSV, with totals.
    Payroll(PayrollArgs),
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    logging::init_logging(&config.logging.level);
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }

    match &config.source {
        Some(path) => debug!(path = %path.display(), "loaded config file"),
        None => debug!("no config file, using defaults"),
    }
    debug!(?config, "starting");

    let report = match &cli.command {
        Commands::Tax(args) => run_tax(args, &config),
        Commands::Compare(args) => run_compare(args, &config),
        Commands::Cit(args) => run_cit(args),
        Commands::Installments(args) => run_installments(args, &config),
        Commands::Penalty(args) => run_penalty(args),
        Commands::Payroll(args) => run_payroll(args, &config),
    }
    .context("command failed")?;

    print!("{report}");
    info!("done");

    Ok(())
}
