//! Pure trading arithmetic.
//!
//! Every function here is total: degenerate inputs (no trades, zero risk)
//! produce `0` rather than `NaN` or a panic. The single exception is
//! [`profit_factor`], which reports `f64::INFINITY` for a record with profits
//! and no losses.

pub mod performance;
pub mod risk;

pub use performance::{expectancy, profit_factor, win_rate};
pub use risk::{position_size, r_multiple};
