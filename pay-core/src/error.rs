//! Error types shared by the band table, the engine, and the input layer.
//!
//! Configuration problems are fatal and stop a run before any breakdown is
//! produced. Validation problems describe bad caller input; the interactive
//! front end re-prompts on them.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Category;

/// Problems with the band table or the file it was loaded from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A category required for the calculation is absent from the table.
    #[error("band table has no '{0}' category")]
    MissingCategory(Category),

    /// A category is present but holds no bands.
    #[error("band table category '{0}' has no bands")]
    EmptyCategory(Category),

    /// A row named a category the engine does not know.
    #[error("unknown band category '{name}' on line {line}")]
    UnknownCategory { line: u64, name: String },

    /// A row had the wrong number of fields or a field that is not a number.
    #[error("malformed band row on line {line} (category '{category}'): {message}")]
    MalformedRow {
        line: u64,
        category: String,
        message: String,
    },

    /// Thresholds within a category must be strictly ascending.
    #[error("bands for '{category}' are out of order: {threshold} does not exceed {previous}")]
    UnorderedBands {
        category: Category,
        previous: Decimal,
        threshold: Decimal,
    },

    /// A rate fell outside the range allowed for its category.
    #[error("invalid rate {rate} for '{category}'")]
    InvalidRate { category: Category, rate: Decimal },

    /// Thresholds are income levels and cannot be negative.
    #[error("invalid threshold {threshold} for '{category}'")]
    InvalidThreshold {
        category: Category,
        threshold: Decimal,
    },

    /// The band file could not be read at all.
    #[error("cannot read band table '{path}': {message}")]
    Unreadable { path: String, message: String },
}

/// Why an employee name was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Names can only contain letters and spaces. Please try again.")]
    InvalidCharacters,

    #[error("Nothing entered. Please enter your full name to continue:")]
    Empty,

    #[error(
        "Names should be separated with a space and not begin or end with a space. Please try again."
    )]
    BadSpacing,
}

/// Caller-supplied input that failed validation.
///
/// The display strings are the messages shown to the user before re-prompting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error("Please enter employee number using numeric characters only (0-9).")]
    InvalidEmployeeNumber(String),

    #[error("Please enter yearly gross salary using numeric characters only (0-9).")]
    NonNumericSalary(String),

    #[error("Yearly gross salary cannot be negative. Please try again.")]
    NegativeIncome(Decimal),
}

/// Anything that stops [`compute_breakdown`](crate::compute_breakdown) from
/// producing a result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
