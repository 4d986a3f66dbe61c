//! Employee roster import.
//!
//! ## CSV Format
//!
//! Columns are read by position; the first line is a header and is skipped.
//!
//! | Column | Required | Notes |
//! |------------------|----------|------------------------------------------------|
//! | `Name` | yes | |
//! | `NIN` | no | Exactly 11 digits when present |
//! | `Department` | no | Unknown or empty names become `Other` |
//! | `Monthly Salary` | yes | Must be positive; unparseable values count as 0 |
//! | `Annual Rent` | no | Unparseable values count as 0 |
//!
//! Amounts may use comma thousands separators. Amounts above
//! [`Money::INPUT_LIMIT`] count as unparseable.
//!
//! ```csv
//! Name,NIN,Department,Monthly Salary,Annual Rent
//! Adaeze Okafor,12345678901,Engineering,450000,1200000
//! Musa Bello,,Sales,180000,
//! ```
//!
//! Valid rows become active [`Employee`]s with ids `EMP-0001`, `EMP-0002`, ...
//! in file order and their tax already computed. Invalid rows are collected
//! with every problem found rather than failing the whole import.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use paye_core::calculations::common::normalize_amount_input;
use paye_core::{Department, Employee, LawVersion, Money, TaxPolicy};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

static NIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("NIN pattern is a valid regex"));

pub const TEMPLATE_HEADER: &str = "Name,NIN,Department,Monthly Salary,Annual Rent";

/// Errors that stop a roster import altogether.
#[derive(Debug, Error)]
pub enum RosterLoaderError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
}

/// A data row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based data row number; the header is row 0.
    pub row: usize,
    pub name: String,
    pub errors: Vec<String>,
}

impl RejectedRow {
    /// All problems joined for display, e.g. `Name required, Invalid salary`.
    pub fn message(&self) -> String {
        self.errors.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterImport {
    pub employees: Vec<Employee>,
    pub rejected: Vec<RejectedRow>,
}

impl RosterImport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub struct RosterLoader;

impl RosterLoader {
    /// Parse a roster and compute each employee's tax under the current law.
    pub fn parse<R: Read>(reader: R) -> Result<RosterImport, RosterLoaderError> {
        Self::parse_with_policy(reader, &TaxPolicy::for_version(LawVersion::CURRENT))
    }

    /// Parse a roster and compute each employee's tax under `policy`.
    ///
    /// # Errors
    ///
    /// [`RosterLoaderError::Csv`] if the file is not readable as CSV, e.g.
    /// invalid UTF-8. Row-level problems are reported in
    /// [`RosterImport::rejected`] instead.
    pub fn parse_with_policy<R: Read>(
        reader: R,
        policy: &TaxPolicy,
    ) -> Result<RosterImport, RosterLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut import = RosterImport::default();

        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row_number = idx + 1;

            if record.iter().all(str::is_empty) {
                continue;
            }

            match convert_row(&record, row_number, import.employees.len() + 1) {
                Ok(employee) => import.employees.push(employee.recalculated(policy)),
                Err(rejected) => {
                    warn!(
                        row = rejected.row,
                        name = %rejected.name,
                        errors = %rejected.message(),
                        "rejected roster row"
                    );
                    import.rejected.push(rejected);
                }
            }
        }

        debug!(
            accepted = import.employees.len(),
            rejected = import.rejected.len(),
            "parsed employee roster"
        );

        Ok(import)
    }

    /// Convenience wrapper: read a file from disk and delegate to [`RosterLoader::parse`].
    pub fn load_from_file(path: &Path) -> Result<RosterImport, RosterLoaderError> {
        let file = std::fs::File::open(path)?;
        Self::parse(file)
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
) -> &'r str {
    record
        .get(index)
        .map(|value| value.trim_matches(|c| c == '"' || c == '\''))
        .unwrap_or_default()
}

fn lenient_amount(value: &str) -> Money {
    normalize_amount_input(value)
        .parse::<Decimal>()
        .map(Money::new)
        .ok()
        .filter(|amount| amount.within_input_limit())
        .unwrap_or_default()
}

fn convert_row(
    record: &csv::StringRecord,
    row_number: usize,
    sequence: usize,
) -> Result<Employee, RejectedRow> {
    let name = field(record, 0);
    let nin = Some(field(record, 1)).filter(|nin| !nin.is_empty());
    let department = Department::from_label(field(record, 2));
    let monthly_salary = lenient_amount(field(record, 3));
    let annual_rent = lenient_amount(field(record, 4));

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("Name required".to_string());
    }
    if !monthly_salary.is_positive() {
        errors.push("Invalid salary".to_string());
    }
    if nin.is_some_and(|nin| !NIN_PATTERN.is_match(nin)) {
        errors.push("Invalid NIN".to_string());
    }

    if !errors.is_empty() {
        return Err(RejectedRow {
            row: row_number,
            name: name.to_string(),
            errors,
        });
    }

    Ok(Employee {
        nin: nin.map(str::to_string),
        department,
        ..Employee::new(
            format!("EMP-{sequence:04}"),
            name,
            monthly_salary,
            annual_rent,
        )
    })
}
