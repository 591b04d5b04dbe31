//! Deduction calculations over a [`BandTable`](crate::BandTable).
//!
//! [`bands`] holds the schedule primitives (marginal, flat-rate-by-bracket and
//! flat-fee lookups); [`net_pay`] combines them into a monthly breakdown.

pub mod bands;
pub mod common;
pub mod net_pay;

pub use bands::{cumulative_marginal_amount, flat_fee, flat_rate_lookup};
pub use net_pay::{NetPayCalculator, compute_breakdown};
