mod band_table;
mod breakdown;
mod category;
mod employee;
mod rate_band;

pub use band_table::{BandTable, BandTableBuilder};
pub use breakdown::{BreakdownOptions, DeductionBreakdown};
pub use category::Category;
pub use employee::Employee;
pub use rate_band::RateBand;
