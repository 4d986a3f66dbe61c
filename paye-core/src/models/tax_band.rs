use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::calculations::common::group_thousands;
use crate::models::{Money, Rate};
use crate::policy::PolicyError;

/// One marginal bracket: income in `[lower_bound, upper_bound)` is taxed at
/// `rate`. `upper_bound` is `None` for the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub lower_bound: Money,
    pub upper_bound: Option<Money>,
    pub rate: Rate,
}

impl TaxBand {
    pub const fn new(
        lower_bound: Money,
        upper_bound: Option<Money>,
        rate: Rate,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Width of the band, `None` when unbounded.
    pub fn width(&self) -> Option<Money> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }

    /// Human-readable range, e.g. `800,000 - 1,600,000` or `Above 6,400,000`.
    pub fn label(&self) -> String {
        let lower = group_thousands(self.lower_bound.amount());
        match self.upper_bound {
            Some(upper) => format!("{} - {}", lower, group_thousands(upper.amount())),
            None => format!("Above {}", lower),
        }
    }
}

/// An ordered, validated set of bands covering `[0, ∞)`.
///
/// Built-in tables borrow `'static` data; tables loaded at runtime own theirs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BandTable {
    bands: Cow<'static, [TaxBand]>,
}

impl BandTable {
    /// Validates and wraps a list of bands.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the list is empty, does not start at zero,
    /// has gaps, overlaps or empty bands, is not ascending, has an unbounded
    /// band before the last position, has a bounded last band, or contains a
    /// rate outside `[0, 1)`.
    pub fn new(bands: Vec<TaxBand>) -> Result<Self, PolicyError> {
        let table = Self {
            bands: Cow::Owned(bands),
        };
        table.validate()?;
        Ok(table)
    }

    /// Wraps static data without validation. Built-in tables are checked by tests.
    pub(crate) const fn from_static(bands: &'static [TaxBand]) -> Self {
        Self {
            bands: Cow::Borrowed(bands),
        }
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxBand> {
        self.bands.iter()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// The band whose range contains `income`, if any.
    pub fn band_for(
        &self,
        income: Money,
    ) -> Option<&TaxBand> {
        self.bands.iter().find(|band| {
            income >= band.lower_bound && band.upper_bound.is_none_or(|upper| income < upper)
        })
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let Some(first) = self.bands.first() else {
            return Err(PolicyError::EmptyBandTable);
        };
        if first.lower_bound != Money::ZERO {
            return Err(PolicyError::FirstBandNotAtZero(first.lower_bound));
        }

        let last_index = self.bands.len() - 1;
        for (index, band) in self.bands.iter().enumerate() {
            if band.rate < Rate::ZERO || band.rate.fraction() >= rust_decimal::Decimal::ONE {
                return Err(PolicyError::InvalidRate {
                    index,
                    rate: band.rate,
                });
            }

            match band.upper_bound {
                None if index != last_index => {
                    return Err(PolicyError::UnboundedBandNotLast(index));
                }
                None => {}
                Some(_) if index == last_index => {
                    return Err(PolicyError::LastBandBounded);
                }
                Some(upper) => {
                    if upper <= band.lower_bound {
                        return Err(PolicyError::EmptyBand(index));
                    }
                    let next = &self.bands[index + 1];
                    if next.lower_bound != upper {
                        return Err(PolicyError::NotContiguous {
                            index: index + 1,
                            expected: upper,
                            found: next.lower_bound,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// The slice of income that fell into one band, and the tax charged on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandResult {
    pub label: String,
    pub rate: Rate,
    pub taxable_amount_in_band: Money,
    pub tax_amount_in_band: Money,
}
