//! Common helpers for pay calculations.

use rust_decimal::Decimal;

/// Months in a pay year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly half a penny round away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pay_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a yearly amount to a monthly one without rounding.
pub fn monthly(yearly: Decimal) -> Decimal {
    yearly / MONTHS_PER_YEAR
}
