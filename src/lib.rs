//! `curve-digitizer` library crate.
//!
//! The binary (`digitize`) is a thin wrapper around this library so that:
//!
//! - the segmentation/fitting pipeline is testable without spawning processes
//! - modules are reusable (e.g., batch runners, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod calib;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod overlay;
pub mod raster;
pub mod reduce;
pub mod report;
pub mod segment;
