use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ConfigurationError;
use crate::models::{Category, RateBand};

/// Deduction schedules keyed by category.
///
/// A table is only obtainable through [`BandTableBuilder::build`] (or
/// [`BandTable::standard`]), which checks ordering and rate ranges, and it
/// exposes no way to mutate it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BandTable {
    categories: BTreeMap<Category, Vec<RateBand>>,
}

impl BandTable {
    pub fn builder() -> BandTableBuilder {
        BandTableBuilder::default()
    }

    /// The compiled-in UK schedule: 2023/24 income tax and employee NI, the
    /// public-sector pension contribution brackets, and a £10 monthly parking fee.
    ///
    /// Pension thresholds are bracket ceilings; the final bracket is unbounded.
    pub fn standard() -> Self {
        let d = Decimal::new;
        let table = Self::builder()
            .category(
                Category::IncomeTax,
                [
                    RateBand::new(d(12570, 0), d(20, 2)),
                    RateBand::new(d(50270, 0), d(40, 2)),
                    RateBand::new(d(125140, 0), d(45, 2)),
                ],
            )
            .category(
                Category::NationalInsurance,
                [
                    RateBand::new(d(12570, 0), d(12, 2)),
                    RateBand::new(d(50270, 0), d(2, 2)),
                ],
            )
            .category(
                Category::Pension,
                [
                    RateBand::new(d(3213599, 2), d(74, 3)),
                    RateBand::new(d(4325999, 2), d(86, 3)),
                    RateBand::new(d(5129299, 2), d(96, 3)),
                    RateBand::new(d(6797999, 2), d(102, 3)),
                    RateBand::new(d(9269799, 2), d(113, 3)),
                    RateBand::new(RateBand::UNBOUNDED, d(117, 3)),
                ],
            )
            .category(Category::Parking, [RateBand::new(d(0, 0), d(10, 0))]);

        // The literals above satisfy every check in `validate`.
        Self {
            categories: table.categories,
        }
    }

    /// Bands for `category`, or `None` if the table does not define it.
    pub fn get(
        &self,
        category: Category,
    ) -> Option<&[RateBand]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    /// Bands for `category`, failing if the category is absent or empty.
    pub fn require(
        &self,
        category: Category,
    ) -> Result<&[RateBand], ConfigurationError> {
        match self.get(category) {
            None => Err(ConfigurationError::MissingCategory(category)),
            Some([]) => Err(ConfigurationError::EmptyCategory(category)),
            Some(bands) => Ok(bands),
        }
    }

    pub fn contains(
        &self,
        category: Category,
    ) -> bool {
        self.categories.contains_key(&category)
    }

    /// Defined categories in a stable order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[RateBand])> {
        self.categories
            .iter()
            .map(|(category, bands)| (*category, bands.as_slice()))
    }

    /// Known categories the table does not define.
    pub fn missing_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !self.contains(*category))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        for (&category, bands) in &self.categories {
            let mut previous: Option<Decimal> = None;
            for band in bands {
                if band.threshold < Decimal::ZERO {
                    return Err(ConfigurationError::InvalidThreshold {
                        category,
                        threshold: band.threshold,
                    });
                }
                let rate_ok = if category.rate_is_fraction() {
                    band.rate >= Decimal::ZERO && band.rate <= Decimal::ONE
                } else {
                    band.rate >= Decimal::ZERO
                };
                if !rate_ok {
                    return Err(ConfigurationError::InvalidRate {
                        category,
                        rate: band.rate,
                    });
                }
                if let Some(previous) = previous
                    && band.threshold <= previous
                {
                    return Err(ConfigurationError::UnorderedBands {
                        category,
                        previous,
                        threshold: band.threshold,
                    });
                }
                previous = Some(band.threshold);
            }
        }
        Ok(())
    }
}

impl fmt::Display for BandTable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (category, bands) in self.categories() {
            writeln!(f, "{category}:")?;
            for band in bands {
                if band.is_unbounded() {
                    writeln!(f, "  above previous  rate {}", band.rate)?;
                } else {
                    writeln!(f, "  from {:<12}rate {}", band.threshold.to_string(), band.rate)?;
                }
            }
        }
        Ok(())
    }
}

/// Collects bands in insertion order and checks them on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct BandTableBuilder {
    categories: BTreeMap<Category, Vec<RateBand>>,
}

impl BandTableBuilder {
    /// Appends one band to `category`, creating the category if needed.
    pub fn push(
        &mut self,
        category: Category,
        band: RateBand,
    ) -> &mut Self {
        self.categories.entry(category).or_default().push(band);
        self
    }

    /// Replaces `category` with `bands`.
    pub fn category(
        mut self,
        category: Category,
        bands: impl IntoIterator<Item = RateBand>,
    ) -> Self {
        self.categories
            .insert(category, bands.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<BandTable, ConfigurationError> {
        let table = BandTable {
            categories: self.categories,
        };
        table.validate()?;
        Ok(table)
    }
}
