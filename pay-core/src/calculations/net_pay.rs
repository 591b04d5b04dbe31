//! Monthly net pay from a yearly gross salary.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Gross monthly = yearly income / 12 |
//! | 2 | Pension (yearly) = flat-rate-by-bracket on yearly income, if enabled |
//! | 3 | Taxable (yearly) = yearly income − pension |
//! | 4 | Taxable (monthly) = (taxable − personal allowance) / 12, minimum 0 |
//! | 5 | Income tax (yearly) = marginal schedule on taxable |
//! | 6 | National insurance (yearly) = marginal schedule on taxable |
//! | 7 | Parking (monthly) = flat fee, if enabled |
//! | 8 | Total deductions = tax/12 + NI/12 + pension/12 + parking |
//! | 9 | Net monthly = gross monthly − total deductions, minimum 0 |
//!
//! The personal allowance is the first income-tax threshold in the table.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pay_core::calculations::common::round_half_up;
//! use pay_core::{BandTable, BreakdownOptions, compute_breakdown};
//!
//! let table = BandTable::standard();
//! let breakdown = compute_breakdown(dec!(40000), &table, BreakdownOptions::default()).unwrap();
//!
//! assert_eq!(round_half_up(breakdown.pension_monthly), dec!(286.67));
//! assert_eq!(round_half_up(breakdown.net_monthly), dec!(2396.93));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::bands::{cumulative_marginal_amount, flat_fee, flat_rate_lookup};
use crate::calculations::common::{max, monthly};
use crate::error::{CalculationError, ConfigurationError, ValidationError};
use crate::models::{BandTable, BreakdownOptions, Category, DeductionBreakdown, RateBand};

/// Calculates a [`DeductionBreakdown`] in one call.
///
/// # Errors
///
/// - [`CalculationError::Configuration`] if a category needed by `options`
///   is missing or empty. Nothing is computed in that case.
/// - [`CalculationError::Validation`] if `income` is negative.
pub fn compute_breakdown(
    income: Decimal,
    table: &BandTable,
    options: BreakdownOptions,
) -> Result<DeductionBreakdown, CalculationError> {
    NetPayCalculator::new(table, options)?.calculate(income)
}

/// Net pay calculator bound to the schedules of one band table.
///
/// Every category the options need is resolved by [`new`](Self::new), so a
/// configuration problem surfaces before any income is looked at.
#[derive(Debug, Clone)]
pub struct NetPayCalculator<'a> {
    income_tax: &'a [RateBand],
    national_insurance: &'a [RateBand],
    pension: Option<&'a [RateBand]>,
    parking_fee: Option<Decimal>,
}

impl<'a> NetPayCalculator<'a> {
    /// Resolves the schedules required by `options` from `table`.
    ///
    /// Income tax and national insurance are always required; pension and
    /// parking only when enabled.
    pub fn new(
        table: &'a BandTable,
        options: BreakdownOptions,
    ) -> Result<Self, ConfigurationError> {
        let income_tax = table.require(Category::IncomeTax)?;
        let national_insurance = table.require(Category::NationalInsurance)?;
        let pension = if options.include_pension {
            Some(table.require(Category::Pension)?)
        } else {
            None
        };
        let parking_fee = if options.include_parking_fee {
            Some(flat_fee(table.require(Category::Parking)?)?)
        } else {
            None
        };

        debug!(
            income_tax_bands = income_tax.len(),
            national_insurance_bands = national_insurance.len(),
            pension = pension.is_some(),
            parking = parking_fee.is_some(),
            "resolved band table"
        );

        Ok(Self {
            income_tax,
            national_insurance,
            pension,
            parking_fee,
        })
    }

    /// The baseline below which no income tax is owed.
    pub fn personal_allowance(&self) -> Decimal {
        self.income_tax
            .first()
            .map_or(Decimal::ZERO, |band| band.threshold)
    }

    /// Calculates the monthly breakdown for a yearly gross `income`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeIncome`] for negative income.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Result<DeductionBreakdown, CalculationError> {
        if income < Decimal::ZERO {
            return Err(ValidationError::NegativeIncome(income).into());
        }

        let gross_monthly = monthly(income);
        let pension_yearly = self.pension_yearly(income)?;
        let taxable_yearly = income - pension_yearly;
        let taxable_monthly = self.taxable_monthly(taxable_yearly);
        let income_tax_yearly = cumulative_marginal_amount(taxable_yearly, self.income_tax);
        let national_insurance_yearly =
            cumulative_marginal_amount(taxable_yearly, self.national_insurance);
        let parking_monthly = self.parking_fee.unwrap_or(Decimal::ZERO);

        let pension_monthly = monthly(pension_yearly);
        let income_tax_monthly = monthly(income_tax_yearly);
        let national_insurance_monthly = monthly(national_insurance_yearly);

        let total_deductions_monthly =
            national_insurance_monthly + income_tax_monthly + pension_monthly + parking_monthly;
        let net_monthly = max(gross_monthly - total_deductions_monthly, Decimal::ZERO);

        debug!(
            income = %income,
            pension = %pension_yearly,
            taxable = %taxable_yearly,
            income_tax = %income_tax_yearly,
            national_insurance = %national_insurance_yearly,
            "calculated yearly deductions"
        );

        Ok(DeductionBreakdown {
            gross_monthly,
            pension_monthly,
            taxable_monthly,
            income_tax_monthly,
            national_insurance_monthly,
            parking_monthly,
            total_deductions_monthly,
            net_monthly,
        })
    }

    fn pension_yearly(
        &self,
        income: Decimal,
    ) -> Result<Decimal, ConfigurationError> {
        match self.pension {
            Some(bands) => flat_rate_lookup(income, bands),
            None => Ok(Decimal::ZERO),
        }
    }

    fn taxable_monthly(
        &self,
        taxable_yearly: Decimal,
    ) -> Decimal {
        max(
            monthly(taxable_yearly - self.personal_allowance()),
            Decimal::ZERO,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;

    fn rounded(breakdown: &DeductionBreakdown) -> [Decimal; 8] {
        [
            breakdown.gross_monthly,
            breakdown.pension_monthly,
            breakdown.taxable_monthly,
            breakdown.income_tax_monthly,
            breakdown.national_insurance_monthly,
            breakdown.parking_monthly,
            breakdown.total_deductions_monthly,
            breakdown.net_monthly,
        ]
        .map(round_half_up)
    }

    fn table_without(category: Category) -> BandTable {
        let standard = BandTable::standard();
        let mut builder = BandTable::builder();
        for (c, bands) in standard.categories().filter(|(c, _)| *c != category) {
            for band in bands {
                builder.push(c, *band);
            }
        }
        builder.build().unwrap()
    }

    #[test]
    fn breakdown_for_forty_thousand() {
        let table = BandTable::standard();

        let breakdown = compute_breakdown(dec!(40000), &table, BreakdownOptions::default()).unwrap();

        assert_eq!(
            rounded(&breakdown),
            [
                dec!(3333.33), // gross
                dec!(286.67),  // pension: 40000 * 8.6% / 12
                dec!(1999.17), // taxable: (36560 - 12570) / 12
                dec!(399.83),  // tax: 23990 * 20% / 12
                dec!(239.90),  // NI: 23990 * 12% / 12
                dec!(10.00),   // parking
                dec!(936.40),
                dec!(2396.93),
            ]
        );
    }

    #[test]
    fn breakdown_for_sixty_thousand_crosses_higher_rate() {
        let table = BandTable::standard();

        let breakdown = compute_breakdown(dec!(60000), &table, BreakdownOptions::default()).unwrap();

        // Pension 60000 * 10.2% = 6120, taxable 53880.
        assert_eq!(breakdown.pension_monthly, dec!(510));
        // 7540 + (53880 - 50270) * 0.40 = 8984
        assert_eq!(round_half_up(breakdown.income_tax_monthly), dec!(748.67));
        // 4524 + (53880 - 50270) * 0.02 = 4596.20
        assert_eq!(round_half_up(breakdown.national_insurance_monthly), dec!(383.02));
    }

    #[test]
    fn personal_allowance_comes_from_the_table() {
        let table = BandTable::builder()
            .category(Category::IncomeTax, [RateBand::new(dec!(10000), dec!(0.10))])
            .category(
                Category::NationalInsurance,
                [RateBand::new(dec!(10000), dec!(0.10))],
            )
            .build()
            .unwrap();
        let options = BreakdownOptions {
            include_pension: false,
            include_parking_fee: false,
        };

        let calculator = NetPayCalculator::new(&table, options).unwrap();
        let breakdown = calculator.calculate(dec!(22000)).unwrap();

        assert_eq!(calculator.personal_allowance(), dec!(10000));
        assert_eq!(breakdown.taxable_monthly, dec!(1000));
        assert_eq!(breakdown.income_tax_monthly, dec!(100));
        assert_eq!(breakdown.total_deductions_monthly, dec!(200));
        assert_eq!(round_half_up(breakdown.net_monthly), dec!(1633.33));
    }

    #[test]
    fn zero_income_has_no_income_based_deductions() {
        let table = BandTable::standard();
        let options = BreakdownOptions {
            include_pension: true,
            include_parking_fee: false,
        };

        let breakdown = compute_breakdown(dec!(0), &table, options).unwrap();

        assert_eq!(rounded(&breakdown), [dec!(0); 8]);
    }

    #[test]
    fn zero_income_with_parking_clamps_net_to_zero() {
        let table = BandTable::standard();

        let breakdown = compute_breakdown(dec!(0), &table, BreakdownOptions::default()).unwrap();

        assert_eq!(breakdown.pension_monthly, dec!(0));
        assert_eq!(breakdown.income_tax_monthly, dec!(0));
        assert_eq!(breakdown.national_insurance_monthly, dec!(0));
        assert_eq!(breakdown.total_deductions_monthly, dec!(10));
        assert_eq!(breakdown.net_monthly, dec!(0));
    }

    #[test]
    fn missing_parking_is_a_configuration_error() {
        let table = table_without(Category::Parking);

        let result = compute_breakdown(dec!(40000), &table, BreakdownOptions::default());

        assert_eq!(
            result,
            Err(CalculationError::Configuration(
                ConfigurationError::MissingCategory(Category::Parking)
            ))
        );
    }

    #[test]
    fn missing_parking_is_fine_when_parking_is_disabled() {
        let table = table_without(Category::Parking);
        let options = BreakdownOptions {
            include_pension: true,
            include_parking_fee: false,
        };

        let breakdown = compute_breakdown(dec!(40000), &table, options).unwrap();

        assert_eq!(breakdown.parking_monthly, dec!(0));
    }

    #[test]
    fn missing_income_tax_is_always_required() {
        let table = table_without(Category::IncomeTax);
        let options = BreakdownOptions {
            include_pension: false,
            include_parking_fee: false,
        };

        let result = NetPayCalculator::new(&table, options);

        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::MissingCategory(Category::IncomeTax)
        );
    }

    #[test]
    fn empty_pension_is_reported_before_calculation() {
        let table = BandTable::builder()
            .category(Category::IncomeTax, [RateBand::new(dec!(12570), dec!(0.20))])
            .category(
                Category::NationalInsurance,
                [RateBand::new(dec!(12570), dec!(0.12))],
            )
            .category(Category::Pension, Vec::new())
            .category(Category::Parking, [RateBand::new(dec!(0), dec!(10))])
            .build()
            .unwrap();

        let result = compute_breakdown(dec!(40000), &table, BreakdownOptions::default());

        assert_eq!(
            result,
            Err(CalculationError::from(ConfigurationError::EmptyCategory(
                Category::Pension
            )))
        );
    }

    #[test]
    fn pension_disabled_taxes_full_income() {
        let table = BandTable::standard();
        let options = BreakdownOptions {
            include_pension: false,
            include_parking_fee: true,
        };

        let breakdown = compute_breakdown(dec!(60000), &table, options).unwrap();

        assert_eq!(breakdown.pension_monthly, dec!(0));
        assert_eq!(breakdown.income_tax_monthly, dec!(11432) / dec!(12));
        assert_eq!(breakdown.national_insurance_monthly, dec!(4718.60) / dec!(12));
    }

    #[test]
    fn negative_income_is_rejected() {
        let table = BandTable::standard();

        let result = compute_breakdown(dec!(-1), &table, BreakdownOptions::default());

        assert_eq!(
            result,
            Err(CalculationError::from(ValidationError::NegativeIncome(dec!(-1))))
        );
    }

    #[test]
    fn calculate_is_idempotent() {
        let table = BandTable::standard();
        let calculator = NetPayCalculator::new(&table, BreakdownOptions::default()).unwrap();

        let first = calculator.calculate(dec!(51293)).unwrap();
        let second = calculator.calculate(dec!(51293)).unwrap();

        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn net_and_taxable_are_never_negative(
            pounds in 0u64..1_000_000,
            include_pension in any::<bool>(),
            include_parking_fee in any::<bool>(),
        ) {
            let table = BandTable::standard();
            let options = BreakdownOptions { include_pension, include_parking_fee };

            let breakdown = compute_breakdown(Decimal::from(pounds), &table, options).unwrap();

            prop_assert!(breakdown.net_monthly >= Decimal::ZERO);
            prop_assert!(breakdown.taxable_monthly >= Decimal::ZERO);
            prop_assert!(breakdown.total_deductions_monthly >= Decimal::ZERO);
        }

        #[test]
        fn identical_inputs_give_identical_breakdowns(pounds in 0u64..1_000_000) {
            let table = BandTable::standard();
            let income = Decimal::from(pounds);

            let first = compute_breakdown(income, &table, BreakdownOptions::default()).unwrap();
            let second = compute_breakdown(income, &table, BreakdownOptions::default()).unwrap();

            prop_assert_eq!(first, second);
        }
    }
}
