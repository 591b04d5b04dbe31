//! Banded-rate schedule primitives.
//!
//! Three readings of a `(threshold, rate)` list are supported:
//!
//! | Function | Used for | Reading |
//! |----------|----------|---------|
//! | [`cumulative_marginal_amount`] | income tax, national insurance | each band's rate applies only to income between its threshold and the next |
//! | [`flat_rate_lookup`] | pension | the whole income is charged at the rate of the bracket it falls in |
//! | [`flat_fee`] | parking | the first band's rate is a fixed amount |
//!
//! The pension reading is deliberately not marginal: crossing a bracket
//! ceiling raises the rate on the entire income, so the contribution jumps.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pay_core::RateBand;
//! use pay_core::calculations::cumulative_marginal_amount;
//!
//! let income_tax = [
//!     RateBand::new(dec!(12570), dec!(0.20)),
//!     RateBand::new(dec!(50270), dec!(0.40)),
//!     RateBand::new(dec!(125140), dec!(0.45)),
//! ];
//!
//! assert_eq!(cumulative_marginal_amount(dec!(60000), &income_tax), dec!(11432));
//! ```

use rust_decimal::Decimal;

use crate::error::ConfigurationError;
use crate::models::{Category, RateBand};

/// Total charge under a progressive marginal schedule.
///
/// Bands must be in ascending threshold order. Income at or below the first
/// threshold yields zero, as does an empty schedule.
pub fn cumulative_marginal_amount(
    income: Decimal,
    bands: &[RateBand],
) -> Decimal {
    let mut total = Decimal::ZERO;

    for (i, band) in bands.iter().enumerate() {
        if band.threshold >= income {
            break;
        }
        match bands.get(i + 1) {
            Some(next) if next.threshold <= income => {
                total += (next.threshold - band.threshold) * band.rate;
            }
            _ => {
                total += (income - band.threshold) * band.rate;
                break;
            }
        }
    }

    total
}

/// Whole-income charge at the rate of the bracket `income` falls in.
///
/// Thresholds are inclusive bracket ceilings: the first band whose threshold
/// is at or above `income` supplies the rate, and income beyond every
/// ceiling uses the last band.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::RateBand;
/// use pay_core::calculations::flat_rate_lookup;
///
/// let pension = [
///     RateBand::new(dec!(32135.99), dec!(0.074)),
///     RateBand::new(dec!(43259.99), dec!(0.086)),
///     RateBand::new(RateBand::UNBOUNDED, dec!(0.096)),
/// ];
///
/// assert_eq!(flat_rate_lookup(dec!(40000), &pension), Ok(dec!(3440.000)));
/// ```
///
/// # Errors
///
/// Returns [`ConfigurationError::EmptyCategory`] for the pension category
/// when `bands` is empty.
pub fn flat_rate_lookup(
    income: Decimal,
    bands: &[RateBand],
) -> Result<Decimal, ConfigurationError> {
    let last = bands
        .last()
        .ok_or(ConfigurationError::EmptyCategory(Category::Pension))?;

    let bracket = bands
        .iter()
        .find(|band| income <= band.threshold)
        .unwrap_or(last);

    Ok(bracket.rate * income)
}

/// The fixed amount held in the first band's rate.
///
/// # Errors
///
/// Returns [`ConfigurationError::EmptyCategory`] for the parking category
/// when `bands` is empty.
pub fn flat_fee(bands: &[RateBand]) -> Result<Decimal, ConfigurationError> {
    match bands {
        [] => Err(ConfigurationError::EmptyCategory(Category::Parking)),
        [only] => Ok(only.rate),
        [first, ..] => {
            tracing::warn!(
                bands = bands.len(),
                fee = %first.rate,
                "flat fee category has more than one band; using the first"
            );
            Ok(first.rate)
        }
    }
}
