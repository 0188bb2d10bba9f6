//! Export digitized samples (CSV) and the fitted curve (JSON).
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON is the "portable" representation of a fit: parameters,
//! diagnostics, the run's configuration echo, and a precomputed fitted grid
//! for quick replotting.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::calib::CalibratedCurve;
use crate::domain::{AxisBounds, DataPoint, DigitizeConfig, PowerLawFit, x_extent};
use crate::error::AppError;

/// Write one row per reduced sample: pixel coordinates and calibrated data.
pub fn write_points_csv(path: &Path, curve: &CalibratedCurve) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create points CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "pixel_x,pixel_y,data_x,data_y")
        .map_err(|e| AppError::new(2, format!("Failed to write points CSV header: {e}")))?;

    for (px, d) in curve.pixels.iter().zip(curve.data.iter()) {
        writeln!(file, "{:.3},{:.3},{:.10},{:.10}", px.x, px.y, d.x, d.y)
            .map_err(|e| AppError::new(2, format!("Failed to write points CSV row: {e}")))?;
    }

    Ok(())
}

/// Schema of the curve JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: String,
    pub image: String,
    pub run_name: String,
    pub lo_diff: u8,
    pub up_diff: u8,
    pub bin_width: u32,
    pub bounds: AxisBounds,
    pub fit: PowerLawFit,
    pub grid: CurveGrid,
}

/// Precomputed fitted grid for quick replotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Write the fitted curve (parameters + sampled grid) as JSON.
pub fn write_curve_json(
    path: &Path,
    config: &DigitizeConfig,
    fit: &PowerLawFit,
    data: &[DataPoint],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create curve JSON '{}': {e}", path.display()),
        )
    })?;

    let (x_lo, x_hi) = x_extent(data).unwrap_or((config.bounds.x_min, config.bounds.x_max));
    let grid = build_grid(fit, x_lo, x_hi, 101);

    let curve = CurveFile {
        tool: "digitize".to_string(),
        generated: Local::now().to_rfc3339(),
        image: config.image_path.display().to_string(),
        run_name: config.run_name.clone(),
        lo_diff: config.segment.lo_diff,
        up_diff: config.segment.up_diff,
        bin_width: config.bin_width,
        bounds: config.bounds,
        fit: fit.clone(),
        grid,
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

fn build_grid(fit: &PowerLawFit, x_lo: f64, x_hi: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let log_lo = x_lo.log10();
    let log_hi = x_hi.log10();
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n - 1) as f64;
        let xi = 10f64.powf(log_lo + u * (log_hi - log_lo));
        x.push(xi);
        y.push(fit.predict(xi));
    }
    CurveGrid { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_spans_range_log_uniformly() {
        let fit = PowerLawFit {
            a: 2.0,
            b: 1.0,
            intercept: 2.0_f64.log10(),
            r_value: 1.0,
            p_value: 0.0,
            std_err: 0.0,
            n: 2,
        };
        let grid = build_grid(&fit, 1.0, 100.0, 5);
        assert_eq!(grid.x.len(), 5);
        assert!((grid.x[0] - 1.0).abs() < 1e-12);
        assert!((grid.x[2] - 10.0).abs() < 1e-9); // log midpoint
        assert!((grid.x[4] - 100.0).abs() < 1e-9);
        for (x, y) in grid.x.iter().zip(grid.y.iter()) {
            assert!((y - 2.0 * x).abs() < 1e-9);
        }
    }
}
