use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a category's schedule.
///
/// What `rate` means depends on the category: a marginal rate for income tax
/// and national insurance, a whole-income rate for pension, and a fixed
/// monthly amount for parking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl RateBand {
    /// Threshold of a bracket with no upper limit.
    pub const UNBOUNDED: Decimal = Decimal::MAX;

    pub const fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }

    pub fn is_unbounded(&self) -> bool {
        self.threshold == Self::UNBOUNDED
    }
}
