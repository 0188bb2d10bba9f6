//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - pixel-space inputs (`PixelPoint`, `SegmentOptions`, `Connectivity`)
//! - intermediate curve representations (`ReducedCurve`, `DataPoint`)
//! - fit outputs (`PowerLawFit`)
//! - the resolved run configuration (`DigitizeConfig`)

pub mod types;

pub use types::*;
