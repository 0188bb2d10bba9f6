//! Formatted terminal output and the append-only results log.
//!
//! Formatting stays in one place so:
//! - the numeric pipeline stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::calib::CalibratedCurve;
use crate::domain::{DigitizeConfig, PowerLawFit};
use crate::error::AppError;

/// Format the full run summary (parameters + fit diagnostics).
pub fn format_run_summary(
    config: &DigitizeConfig,
    mask_pixels: usize,
    curve: &CalibratedCurve,
    fit: &PowerLawFit,
) -> String {
    let mut out = String::new();

    out.push_str("=== digitize - log-log chart power-law fit ===\n");
    out.push_str(&format!("Run: {}\n", config.run_name));
    out.push_str(&format!("Image: {}\n", config.image_path.display()));
    out.push_str(&format!(
        "Seed: ({}, {}) | lo_diff={} up_diff={} | {}\n",
        config.seed.x,
        config.seed.y,
        config.segment.lo_diff,
        config.segment.up_diff,
        config.segment.connectivity.display_name(),
    ));
    out.push_str(&format!("Segmented pixels: {mask_pixels}\n"));
    out.push_str(&format!(
        "Reduced samples: {} (bin_width={})\n",
        curve.pixels.len(),
        config.bin_width,
    ));
    out.push_str(&format!(
        "Axis bounds: x=[{}, {}] y=[{}, {}] (both log)\n",
        config.bounds.x_min, config.bounds.x_max, config.bounds.y_min, config.bounds.y_max,
    ));

    out.push_str("\nPower-law fit y = A * x^B:\n");
    out.push_str(&format!("- A = {:.4}\n", fit.a));
    out.push_str(&format!("- B = {:.4}\n", fit.b));
    out.push_str(&format!(
        "- r = {:.6} | p = {:.3e} | std_err = {:.6} | n = {}\n",
        fit.r_value, fit.p_value, fit.std_err, fit.n,
    ));

    out
}

/// Append one run's parameters and results to the text log.
///
/// The log is append-only; each run contributes a self-contained block, so
/// the file accumulates a history of extractions across images and settings.
pub fn append_results_log(
    path: &Path,
    config: &DigitizeConfig,
    fit: &PowerLawFit,
) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::new(
                2,
                format!("Failed to open results log '{}': {e}", path.display()),
            )
        })?;

    let block = format_log_block(config, fit, &Local::now().to_rfc3339());
    file.write_all(block.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to append results log: {e}")))?;

    Ok(())
}

fn format_log_block(config: &DigitizeConfig, fit: &PowerLawFit, timestamp: &str) -> String {
    let mut block = String::new();
    block.push_str(&format!("=== Run name: {} ===\n", config.run_name));
    block.push_str(&format!("timestamp = {timestamp}\n"));
    block.push_str(&format!(
        "Image filename: {}\n",
        config.image_path.display()
    ));
    block.push_str(&format!("A = {:.4}\n", fit.a));
    block.push_str(&format!("B = {:.4}\n", fit.b));
    block.push_str(&format!("lo_diff = {}\n", config.segment.lo_diff));
    block.push_str(&format!("up_diff = {}\n", config.segment.up_diff));
    block.push_str(&format!("bin_width = {}\n", config.bin_width));
    block.push_str(&format!(
        "x_min = {}, x_max = {}\n",
        config.bounds.x_min, config.bounds.x_max
    ));
    block.push_str(&format!(
        "y_min = {}, y_max = {}\n",
        config.bounds.y_min, config.bounds.y_max
    ));
    block.push_str(&format!("slope = {}\n", fit.b));
    block.push_str(&format!("intercept = {}\n", fit.intercept));
    block.push_str(&format!("r_value = {}\n", fit.r_value));
    block.push_str(&format!("p_value = {}\n", fit.p_value));
    block.push_str(&format!("std_err = {}\n", fit.std_err));
    block.push('\n');
    block
}
