//! Shared domain types.
//!
//! These types are intentionally kept lightweight and (where exported)
//! serializable so they can be:
//!
//! - used in-memory during a digitizing run
//! - exported to CSV/JSON
//! - reloaded later for replotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate, origin top-left, rows increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Neighborhood used when growing the segmented region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Connectivity {
    /// Edge neighbors only.
    #[value(name = "4")]
    Four,
    /// Edge and corner neighbors.
    #[value(name = "8")]
    Eight,
}

impl Connectivity {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Connectivity::Four => "4-way",
            Connectivity::Eight => "8-way",
        }
    }
}

/// Color tolerances around the seed color, plus the growth neighborhood.
///
/// `lo_diff`/`up_diff` are single scalars broadcast to all three channels. A
/// candidate pixel is accepted iff every channel lies within
/// `[seed_c - lo_diff, seed_c + up_diff]`, always measured against the *seed*
/// color (fixed-range growth), never against the accepting neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentOptions {
    pub lo_diff: u8,
    pub up_diff: u8,
    pub connectivity: Connectivity,
}

/// One reduced sample: bin-midpoint column and the mean row of the bin's
/// pixels. Fractional because the midpoint and the mean rarely land on an
/// integer pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReducedSample {
    pub x: f64,
    pub y: f64,
}

/// Reduced curve: one sample per occupied bin, sorted by increasing x.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReducedCurve {
    pub samples: Vec<ReducedSample>,
}

impl ReducedCurve {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Data-space axis extrema as printed on the chart. Both axes are
/// logarithmic, so every bound must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A calibrated point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/// Smallest and largest x across the points, if any.
pub fn x_extent(points: &[DataPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in points {
        lo = lo.min(p.x);
        hi = hi.max(p.x);
    }
    Some((lo, hi))
}

/// Power-law fit `y = a * x^b` with its log-log OLS diagnostics.
///
/// `b` is the slope of the log10-log10 regression; `intercept` is
/// `log10(a)`. `r_value`, `p_value` (two-sided, for the slope) and
/// `std_err` (of the slope) follow the usual simple-regression definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    pub a: f64,
    pub b: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub p_value: f64,
    pub std_err: f64,
    /// Number of points that entered the regression.
    pub n: usize,
}

impl PowerLawFit {
    /// Evaluate the fitted model at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.a * x.powf(self.b)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DigitizeConfig {
    pub image_path: PathBuf,
    /// Name recorded with this run in the results log.
    pub run_name: String,
    pub seed: PixelPoint,
    pub segment: SegmentOptions,
    /// Pixel-column bin width for curve reduction.
    pub bin_width: u32,
    pub bounds: AxisBounds,
    /// Number of fitted-curve samples projected back onto the image.
    pub overlay_samples: usize,
    /// Append-only results log.
    pub log_path: PathBuf,
    pub overlay_path: Option<PathBuf>,
    pub export_points: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}
