//! Reporting utilities: run summaries and the append-only results log.

pub mod format;

pub use format::*;
