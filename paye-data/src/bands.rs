use std::io::Read;
use std::path::Path;

use paye_core::{BandTable, Money, PolicyError, Rate, TaxBand};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a band table.
#[derive(Debug, Error)]
pub enum BandTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("failed to read band table file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid band table: {0}")]
    InvalidTable(#[from] PolicyError),
}

impl From<csv::Error> for BandTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BandTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a band table CSV file.
///
/// - `lower_bound`: where the band starts (inclusive)
/// - `upper_bound`: where it ends (exclusive); empty for the open-ended top band
/// - `rate`: the marginal rate as a fraction (e.g. `0.15` for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BandRecord {
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&BandRecord> for TaxBand {
    fn from(record: &BandRecord) -> Self {
        TaxBand::new(
            Money::new(record.lower_bound),
            record.upper_bound.map(Money::new),
            Rate::new(record.rate),
        )
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for custom band tables from CSV files.
///
/// Rows must already be in ascending order; the loader does not sort them.
/// The resulting table goes through the same validation as any other
/// [`BandTable`].
pub struct BandTableLoader;

impl BandTableLoader {
    /// Parse band records from a CSV reader without validating them as a table.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BandRecord>, BandTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BandRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Turn parsed records into a validated [`BandTable`].
    pub fn build(records: &[BandRecord]) -> Result<BandTable, BandTableLoaderError> {
        let table = BandTable::new(records.iter().map(TaxBand::from).collect())?;
        debug!(bands = table.len(), "built custom band table");
        Ok(table)
    }

    pub fn load<R: Read>(reader: R) -> Result<BandTable, BandTableLoaderError> {
        Self::build(&Self::parse(reader)?)
    }

    pub fn load_from_file(path: &Path) -> Result<BandTable, BandTableLoaderError> {
        let file = std::fs::File::open(path)?;
        Self::load(file)
    }
}
