//! Band table loader for `category,threshold,rate` CSV files.
//!
//! ## CSV Format
//!
//! One band per line, grouped by category, thresholds ascending within each
//! category. The file has no header; a first row whose first cell is
//! `category` is tolerated and skipped. Lines starting with `#` are comments
//! and whitespace around cells is ignored.
//!
//! | Column      | Type    | Notes |
//! |-------------|---------|-------|
//! | `category`  | string  | `incometax`, `nationalinsurance`, `pension` or `parking` |
//! | `threshold` | decimal | `inf`, `infinity` or `∞` for an open-ended bracket |
//! | `rate`      | decimal | fraction of income, or the monthly amount for `parking` |
//!
//! ```csv
//! incometax,12570,0.20
//! incometax,50270,0.40
//! nationalinsurance,12570,0.12
//! pension,32135.99,0.074
//! pension,inf,0.086
//! parking,0,10
//! ```
//!
//! Every bad row is an error naming its line and category; rows are never
//! skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use pay_core::{BandTable, Category, ConfigurationError, RateBand};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

const COLUMNS: [&str; 3] = ["category", "threshold", "rate"];

/// A single row of a band file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct BandRecord {
    category: String,
    #[serde(deserialize_with = "deserialize_threshold")]
    threshold: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    rate: Decimal,
}

fn parse_decimal<E: serde::de::Error>(
    column: &str,
    value: &str,
) -> Result<Decimal, E> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| E::custom(format!("{column}: '{value}' is not a number")))
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_decimal(COLUMNS[2], &s)
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed == "∞"
        || trimmed.eq_ignore_ascii_case("inf")
        || trimmed.eq_ignore_ascii_case("infinity")
    {
        return Ok(RateBand::UNBOUNDED);
    }
    parse_decimal(COLUMNS[1], trimmed)
}

/// The bare reason for a row that failed to deserialise, without csv's
/// position prefix (the caller reports the line itself).
fn describe(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.kind().to_string(),
        _ => err.to_string(),
    }
}

/// Loader for band tables stored as CSV.
pub struct BandTableLoader;

impl BandTableLoader {
    /// Parse a band table from any reader, such as a file or a byte slice.
    ///
    /// # Errors
    ///
    /// * [`ConfigurationError::MalformedRow`] – wrong number of fields or a
    ///   non-numeric threshold or rate.
    /// * [`ConfigurationError::UnknownCategory`] – a category name the engine
    ///   does not use.
    /// * Any validation error from [`BandTable`] construction (ordering,
    ///   rate range, negative threshold).
    pub fn parse<R: Read>(reader: R) -> Result<BandTable, ConfigurationError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // arity is checked per row for a better message
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut builder = BandTable::builder();
        let mut rows = 0usize;

        for (idx, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| ConfigurationError::MalformedRow {
                line: e.position().map_or(0, |p| p.line()),
                category: String::new(),
                message: e.to_string(),
            })?;
            let line = record.position().map_or(0, |p| p.line());
            let hint = record.get(0).unwrap_or_default().to_string();

            if idx == 0 && hint.eq_ignore_ascii_case(COLUMNS[0]) {
                continue;
            }

            if record.len() != COLUMNS.len() {
                return Err(ConfigurationError::MalformedRow {
                    line,
                    category: hint,
                    message: format!(
                        "expected {} fields, found {}",
                        COLUMNS.len(),
                        record.len()
                    ),
                });
            }

            let row: BandRecord =
                record
                    .deserialize(None)
                    .map_err(|e| ConfigurationError::MalformedRow {
                        line,
                        category: hint.clone(),
                        message: describe(&e),
                    })?;

            let category = Category::parse(&row.category.to_ascii_lowercase()).ok_or_else(|| {
                ConfigurationError::UnknownCategory {
                    line,
                    name: row.category.clone(),
                }
            })?;

            builder.push(category, RateBand::new(row.threshold, row.rate));
            rows += 1;
        }

        let table = builder.build()?;
        debug!(rows, missing = ?table.missing_categories(), "parsed band table");
        Ok(table)
    }

    /// Convenience wrapper: open a file and delegate to [`parse`](Self::parse).
    pub fn load_from_path(path: &Path) -> Result<BandTable, ConfigurationError> {
        let file = File::open(path).map_err(|e| ConfigurationError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let table = Self::parse(file)?;
        info!(path = %path.display(), "loaded band table");
        Ok(table)
    }
}
