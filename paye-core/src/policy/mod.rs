//! Tax-law policies: the band table and relief rules each law version applies.
//!
//! A policy is plain data. Supporting another law version means adding a
//! band table and a [`DeductionPolicy`] value, not new evaluation code.

pub mod registry;
mod tax_policy;

pub use registry::PolicyRegistry;
pub use tax_policy::{
    BASIC_SALARY_FRACTION, CONSOLIDATED_FIXED_ALLOWANCE, CONSOLIDATED_FLOOR_RATE,
    CONSOLIDATED_GROSS_RATE, DeductionPolicy, HOUSING_FUND_RATE, PENSION_RATE, PolicyError,
    RENT_RELIEF_CAP, RENT_RELIEF_FRACTION, TaxPolicy, Y2025_BANDS, Y2026_BANDS,
};
