use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which optional deductions a calculation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownOptions {
    pub include_pension: bool,
    pub include_parking_fee: bool,
}

impl Default for BreakdownOptions {
    fn default() -> Self {
        Self {
            include_pension: true,
            include_parking_fee: true,
        }
    }
}

/// Monthly pay figures for one calculation.
///
/// Values keep full precision; rounding to pence is left to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub gross_monthly: Decimal,
    pub pension_monthly: Decimal,

    /// Income above the personal allowance after pension, clamped at zero.
    pub taxable_monthly: Decimal,

    pub income_tax_monthly: Decimal,
    pub national_insurance_monthly: Decimal,
    pub parking_monthly: Decimal,
    pub total_deductions_monthly: Decimal,

    /// Gross minus total deductions, clamped at zero.
    pub net_monthly: Decimal,
}
