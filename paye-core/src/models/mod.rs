mod employee;
mod law_version;
mod money;
mod tax_band;
mod tax_breakdown;

pub use employee::{Department, Employee, EmployeeTax, EmploymentStatus};
pub use law_version::LawVersion;
pub use money::{Money, Rate};
pub use tax_band::{BandResult, BandTable, TaxBand};
pub use tax_breakdown::{CorporateTaxResult, PenaltyResult, TaxBreakdown, TaxComparison};
