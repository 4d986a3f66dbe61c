use paye_core::Money;
use paye_core::calculations::common::normalize_amount_input;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be used as an amount.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount '{input}' exceeds the limit of {limit}")]
    TooLarge { input: String, limit: Money },
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid (non-empty but not parseable).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// [`parse_decimal`] for amounts of money, capped at [`Money::INPUT_LIMIT`].
/// Used as a clap value parser.
pub fn parse_money(s: &str) -> Result<Money, ParseDecimalError> {
    let amount = Money::new(parse_decimal(s)?);
    if !amount.within_input_limit() {
        return Err(ParseDecimalError::TooLarge {
            input: s.to_string(),
            limit: Money::INPUT_LIMIT,
        });
    }
    Ok(amount)
}
