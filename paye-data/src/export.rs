//! Payroll export to CSV.
//!
//! One row per employee followed by a blank line and a summary block. Totals
//! cover every listed employee regardless of status; callers that want only
//! active staff should filter before exporting.

use std::io::Write;
use std::path::Path;

use paye_core::{Employee, Money};
use thiserror::Error;
use tracing::info;

pub const EXPORT_HEADER: [&str; 7] = [
    "Name",
    "NIN",
    "Monthly Salary",
    "Annual Rent",
    "Monthly Tax",
    "Annual Tax",
    "Status",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Two decimal places, midpoint away from zero.
fn two_dp(amount: Money) -> String {
    format!("{:.2}", amount.round_half_up().amount())
}

pub struct PayrollExporter;

impl PayrollExporter {
    pub fn write<W: Write>(
        writer: W,
        employees: &[Employee],
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        csv_writer.write_record(EXPORT_HEADER)?;
        for employee in employees {
            csv_writer.write_record([
                employee.name.clone(),
                employee.nin.clone().unwrap_or_else(|| "N/A".to_string()),
                employee.monthly_salary.to_string(),
                employee.annual_rent.to_string(),
                two_dp(employee.monthly_tax),
                two_dp(employee.annual_tax),
                employee.status.as_str().to_string(),
            ])?;
        }

        let employee_count = employees.len().to_string();
        let total_salary = two_dp(employees.iter().map(|e| e.monthly_salary).sum());
        let total_monthly_tax = two_dp(employees.iter().map(|e| e.monthly_tax).sum());
        let total_annual_tax = two_dp(employees.iter().map(|e| e.annual_tax).sum());

        // A csv::Writer renders an empty record as `""`, so the separator
        // line is written to the underlying writer directly.
        let mut inner = csv_writer.into_inner().map_err(|e| e.into_error())?;
        inner.write_all(b"\n")?;
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(inner);

        let summary: [[&str; 7]; 5] = [
            ["SUMMARY", "", "", "", "", "", ""],
            ["Total Employees", &employee_count, "", "", "", "", ""],
            ["Total Monthly Salary", "", &total_salary, "", "", "", ""],
            ["Total Monthly Tax", "", "", "", &total_monthly_tax, "", ""],
            ["Total Annual Tax", "", "", "", "", &total_annual_tax, ""],
        ];
        for row in summary {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    pub fn render(employees: &[Employee]) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        Self::write(&mut buffer, employees)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn write_to_file(
        path: &Path,
        employees: &[Employee],
    ) -> Result<(), ExportError> {
        let file = std::fs::File::create(path)?;
        Self::write(file, employees)?;
        info!(path = %path.display(), employees = employees.len(), "exported payroll");
        Ok(())
    }
}
