//! Back-projection of the fitted curve into pixel space.
//!
//! Samples the fitted power law log-uniformly across a data-space x range,
//! inverse-maps each (x, y) pair through the axis calibration, clamps to the
//! image bounds (out-of-range samples are clamped, not discarded) and rounds
//! to integer pixel addresses so a renderer can draw connected segments.

use crate::calib::AxisCalibration;
use crate::domain::{PixelPoint, PowerLawFit};
use crate::error::PipelineError;

/// Fitted curve as integer pixel addresses, ordered by increasing data x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayCurve {
    pub points: Vec<PixelPoint>,
}

impl OverlayCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sample the fit across `x_range` (log-uniform, `samples` points) and map it
/// back to pixel space clipped to `bounds` = (width, height).
///
/// Clipping is total and never fails; the only failures are degenerate
/// inputs (non-positive x range, empty image bounds).
pub fn project(
    fit: &PowerLawFit,
    calibration: &AxisCalibration,
    x_range: (f64, f64),
    samples: usize,
    bounds: (u32, u32),
) -> Result<OverlayCurve, PipelineError> {
    let (x_lo, x_hi) = x_range;
    if !(x_lo > 0.0 && x_hi > 0.0) {
        return Err(PipelineError::DegenerateRange(format!(
            "overlay x range must be positive (got {x_lo}..{x_hi})"
        )));
    }
    let (width, height) = bounds;
    if width == 0 || height == 0 {
        return Err(PipelineError::DegenerateRange(
            "image bounds are empty".into(),
        ));
    }
    let samples = samples.max(2);

    let log_lo = x_lo.log10();
    let log_hi = x_hi.log10();

    let mut points = Vec::with_capacity(samples);
    for i in 0..samples {
        let u = i as f64 / (samples - 1) as f64;
        let x = 10f64.powf(log_lo + u * (log_hi - log_lo));
        let y = fit.predict(x);

        let px = calibration.x.data_to_pixel(x);
        let py = calibration.y.data_to_pixel(y);

        // Clamp, never discard: out-of-frame samples pin to the border.
        // (A NaN coordinate also lands on the border via the saturating cast.)
        let px = px.round().clamp(0.0, (width - 1) as f64) as u32;
        let py = py.round().clamp(0.0, (height - 1) as f64) as u32;
        points.push(PixelPoint::new(px, py));
    }

    Ok(OverlayCurve { points })
}
