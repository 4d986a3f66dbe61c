use std::borrow::Cow;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BandTable, LawVersion, Money, Rate, TaxBand};

/// Errors raised when building or looking up a tax policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("band table has no bands")]
    EmptyBandTable,

    #[error("first band must start at 0, got {0}")]
    FirstBandNotAtZero(Money),

    #[error("band {index} has rate {rate}, expected a fraction in [0, 1)")]
    InvalidRate { index: usize, rate: Rate },

    #[error("band {0} is unbounded but is not the last band")]
    UnboundedBandNotLast(usize),

    #[error("last band must have no upper bound")]
    LastBandBounded,

    #[error("band {0} has an upper bound that does not exceed its lower bound")]
    EmptyBand(usize),

    #[error("band {index} starts at {found}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: Money,
        found: Money,
    },

    #[error("unknown tax policy '{code}'; available: {available:?}")]
    UnknownPolicy {
        code: String,
        available: Vec<String>,
    },
}

// ─── 2026 law ────────────────────────────────────────────────────────────────

/// Pension contribution as a share of gross income.
pub const PENSION_RATE: Rate = Rate::new(dec!(0.08));

/// Share of gross income assumed to be basic salary. A policy approximation:
/// the real split is employer-specific and not derivable from gross income.
pub const BASIC_SALARY_FRACTION: Rate = Rate::new(dec!(0.25));

/// Housing-fund contribution as a share of basic salary.
pub const HOUSING_FUND_RATE: Rate = Rate::new(dec!(0.025));

/// Share of annual rent granted as relief, before the cap.
pub const RENT_RELIEF_FRACTION: Rate = Rate::new(dec!(0.20));

pub const RENT_RELIEF_CAP: Money = Money::new(dec!(500000));

pub static Y2026_BANDS: [TaxBand; 5] = [
    TaxBand::new(Money::ZERO, Some(Money::new(dec!(800000))), Rate::ZERO),
    TaxBand::new(
        Money::new(dec!(800000)),
        Some(Money::new(dec!(1600000))),
        Rate::new(dec!(0.15)),
    ),
    TaxBand::new(
        Money::new(dec!(1600000)),
        Some(Money::new(dec!(3200000))),
        Rate::new(dec!(0.18)),
    ),
    TaxBand::new(
        Money::new(dec!(3200000)),
        Some(Money::new(dec!(6400000))),
        Rate::new(dec!(0.21)),
    ),
    TaxBand::new(Money::new(dec!(6400000)), None, Rate::new(dec!(0.25))),
];

// ─── pre-2026 law ────────────────────────────────────────────────────────────

pub const CONSOLIDATED_FIXED_ALLOWANCE: Money = Money::new(dec!(200000));
pub const CONSOLIDATED_GROSS_RATE: Rate = Rate::new(dec!(0.20));
pub const CONSOLIDATED_FLOOR_RATE: Rate = Rate::new(dec!(0.21));

pub static Y2025_BANDS: [TaxBand; 6] = [
    TaxBand::new(
        Money::ZERO,
        Some(Money::new(dec!(300000))),
        Rate::new(dec!(0.07)),
    ),
    TaxBand::new(
        Money::new(dec!(300000)),
        Some(Money::new(dec!(600000))),
        Rate::new(dec!(0.11)),
    ),
    TaxBand::new(
        Money::new(dec!(600000)),
        Some(Money::new(dec!(1100000))),
        Rate::new(dec!(0.15)),
    ),
    TaxBand::new(
        Money::new(dec!(1100000)),
        Some(Money::new(dec!(1600000))),
        Rate::new(dec!(0.19)),
    ),
    TaxBand::new(
        Money::new(dec!(1600000)),
        Some(Money::new(dec!(3200000))),
        Rate::new(dec!(0.21)),
    ),
    TaxBand::new(Money::new(dec!(3200000)), None, Rate::new(dec!(0.24))),
];

/// How gross income is reduced to taxable income under a law version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeductionPolicy {
    /// Separate pension, housing-fund and capped rent-relief deductions.
    Statutory {
        pension_rate: Rate,
        basic_salary_fraction: Rate,
        housing_fund_rate: Rate,
        rent_relief_fraction: Rate,
        rent_relief_cap: Money,
    },

    /// A single allowance of `max(fixed_allowance + gross * gross_rate,
    /// gross * floor_rate)`. Rent is ignored.
    ConsolidatedRelief {
        fixed_allowance: Money,
        gross_rate: Rate,
        floor_rate: Rate,
    },
}

impl DeductionPolicy {
    pub const STATUTORY_2026: DeductionPolicy = DeductionPolicy::Statutory {
        pension_rate: PENSION_RATE,
        basic_salary_fraction: BASIC_SALARY_FRACTION,
        housing_fund_rate: HOUSING_FUND_RATE,
        rent_relief_fraction: RENT_RELIEF_FRACTION,
        rent_relief_cap: RENT_RELIEF_CAP,
    };

    pub const CONSOLIDATED_2025: DeductionPolicy = DeductionPolicy::ConsolidatedRelief {
        fixed_allowance: CONSOLIDATED_FIXED_ALLOWANCE,
        gross_rate: CONSOLIDATED_GROSS_RATE,
        floor_rate: CONSOLIDATED_FLOOR_RATE,
    };
}

/// Everything needed to turn a gross income into a tax liability under one law.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxPolicy {
    pub code: Cow<'static, str>,
    pub bands: BandTable,
    pub deductions: DeductionPolicy,
}

impl TaxPolicy {
    pub fn new(
        code: impl Into<String>,
        bands: BandTable,
        deductions: DeductionPolicy,
    ) -> Self {
        Self {
            code: Cow::Owned(code.into()),
            bands,
            deductions,
        }
    }

    /// The built-in policy for a law version.
    pub const fn for_version(version: LawVersion) -> Self {
        match version {
            LawVersion::Y2025 => Self {
                code: Cow::Borrowed("2025"),
                bands: BandTable::from_static(&Y2025_BANDS),
                deductions: DeductionPolicy::CONSOLIDATED_2025,
            },
            LawVersion::Y2026 => Self {
                code: Cow::Borrowed("2026"),
                bands: BandTable::from_static(&Y2026_BANDS),
                deductions: DeductionPolicy::STATUTORY_2026,
            },
        }
    }

    /// Same relief rules, different bands. Used for custom band tables.
    pub fn with_bands(
        &self,
        code: impl Into<String>,
        bands: BandTable,
    ) -> Self {
        Self::new(code, bands, self.deductions)
    }
}

impl From<LawVersion> for TaxPolicy {
    fn from(version: LawVersion) -> Self {
        Self::for_version(version)
    }
}
