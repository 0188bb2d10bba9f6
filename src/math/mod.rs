//! Mathematical utilities: least-squares solve and regression statistics.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
