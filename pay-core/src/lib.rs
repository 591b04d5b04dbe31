pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::{NetPayCalculator, compute_breakdown};
pub use error::{CalculationError, ConfigurationError, NameError, ValidationError};
pub use models::*;
