//! CSV import and export around the PAYE engine: employee rosters in,
//! custom band tables in, payroll reports out.

pub mod bands;
pub mod export;
pub mod roster;

pub use bands::{BandRecord, BandTableLoader, BandTableLoaderError};
pub use export::{EXPORT_HEADER, ExportError, PayrollExporter};
pub use roster::{RejectedRow, RosterImport, RosterLoader, RosterLoaderError, TEMPLATE_HEADER};
