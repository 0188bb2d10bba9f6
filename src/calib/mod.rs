//! Log-linear axis calibration.
//!
//! Both chart axes are logarithmic in data space and linear in pixel space,
//! so each axis maps affinely between pixel position and `log10(data)`:
//!
//! ```text
//! log10(data) = log_min + (px - px_min) * (log_max - log_min) / (px_max - px_min)
//! ```
//!
//! The x-axis pixel extrema come straight from the reduced curve. The y-axis
//! swaps its pixel extrema because image rows increase downward while data
//! values increase upward.

use serde::{Deserialize, Serialize};

use crate::domain::{AxisBounds, DataPoint, ReducedCurve, ReducedSample};
use crate::error::PipelineError;

/// Affine map between pixel position and `log10(data)` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogAxis {
    log_min: f64,
    log_max: f64,
    px_min: f64,
    px_max: f64,
}

impl LogAxis {
    /// Build an axis map.
    ///
    /// Data bounds must be finite, positive (log scale) and distinct; the pixel
    /// extent must be non-degenerate. Anything else fails with
    /// [`PipelineError::DegenerateRange`].
    pub fn new(
        data_min: f64,
        data_max: f64,
        px_min: f64,
        px_max: f64,
    ) -> Result<Self, PipelineError> {
        if !data_min.is_finite() || !data_max.is_finite() {
            return Err(PipelineError::DegenerateRange(format!(
                "data bounds must be finite (got {data_min} and {data_max})"
            )));
        }
        if !(data_min > 0.0) || !(data_max > 0.0) {
            return Err(PipelineError::DegenerateRange(format!(
                "data bounds must be positive on a log axis (got {data_min} and {data_max})"
            )));
        }
        if data_min == data_max {
            return Err(PipelineError::DegenerateRange(format!(
                "data bounds must differ (got {data_min} on both ends)"
            )));
        }
        if px_min == px_max {
            return Err(PipelineError::DegenerateRange(format!(
                "pixel extent is zero-width at {px_min}"
            )));
        }
        Ok(Self {
            log_min: data_min.log10(),
            log_max: data_max.log10(),
            px_min,
            px_max,
        })
    }

    /// Pixel position -> data value.
    pub fn pixel_to_data(&self, px: f64) -> f64 {
        let log = self.log_min
            + (px - self.px_min) * (self.log_max - self.log_min) / (self.px_max - self.px_min);
        10f64.powf(log)
    }

    /// Data value -> (fractional) pixel position.
    pub fn data_to_pixel(&self, data: f64) -> f64 {
        self.px_min
            + (data.log10() - self.log_min) * (self.px_max - self.px_min)
                / (self.log_max - self.log_min)
    }
}

/// Pixel<->data transforms for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    pub x: LogAxis,
    pub y: LogAxis,
}

/// A reduced curve carried into data space.
///
/// `pixels` and `data` are index-aligned: entry i of one describes the same
/// sample as entry i of the other, so later stages can zip them.
#[derive(Debug, Clone)]
pub struct CalibratedCurve {
    pub calibration: AxisCalibration,
    /// Reduced samples that survived the non-finite filter.
    pub pixels: Vec<ReducedSample>,
    /// Calibrated data points, index-aligned with `pixels`.
    pub data: Vec<DataPoint>,
}

/// Build the calibration from the reduced curve's pixel extrema and map every
/// sample into data space.
///
/// Samples mapping to a non-finite coordinate are dropped from both arrays in
/// lockstep (a bounded degradation, not a failure); if nothing survives the
/// result is [`PipelineError::NoValidPoints`].
pub fn calibrate(
    curve: &ReducedCurve,
    bounds: &AxisBounds,
) -> Result<CalibratedCurve, PipelineError> {
    if curve.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut x_px_min = f64::INFINITY;
    let mut x_px_max = f64::NEG_INFINITY;
    let mut y_px_min = f64::INFINITY;
    let mut y_px_max = f64::NEG_INFINITY;
    for s in &curve.samples {
        x_px_min = x_px_min.min(s.x);
        x_px_max = x_px_max.max(s.x);
        y_px_min = y_px_min.min(s.y);
        y_px_max = y_px_max.max(s.y);
    }

    let x_axis = LogAxis::new(bounds.x_min, bounds.x_max, x_px_min, x_px_max)?;
    // Rows grow downward: the largest row maps to the smallest data value.
    let y_axis = LogAxis::new(bounds.y_min, bounds.y_max, y_px_max, y_px_min)?;
    let calibration = AxisCalibration {
        x: x_axis,
        y: y_axis,
    };

    let mut pixels = Vec::with_capacity(curve.len());
    let mut data = Vec::with_capacity(curve.len());
    for s in &curve.samples {
        let point = DataPoint {
            x: calibration.x.pixel_to_data(s.x),
            y: calibration.y.pixel_to_data(s.y),
        };
        if point.x.is_finite() && point.y.is_finite() {
            pixels.push(*s);
            data.push(point);
        }
    }

    if data.is_empty() {
        return Err(PipelineError::NoValidPoints);
    }

    Ok(CalibratedCurve {
        calibration,
        pixels,
        data,
    })
}
