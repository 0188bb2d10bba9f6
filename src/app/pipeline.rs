//! The digitize pipeline shared by the CLI front-end and the integration tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! segment -> reduce -> calibrate -> fit -> project overlay
//!
//! The CLI can then focus on presentation (printing, log appends, file writes).

use crate::calib::{self, CalibratedCurve};
use crate::domain::{DigitizeConfig, PowerLawFit, x_extent};
use crate::error::AppError;
use crate::overlay::{self, OverlayCurve};
use crate::raster::RasterImage;
use crate::segment;

/// All computed outputs of a single `digitize` run.
#[derive(Debug)]
pub struct RunOutput {
    pub image: RasterImage,
    pub mask_pixels: usize,
    pub curve: CalibratedCurve,
    pub fit: PowerLawFit,
    pub overlay: OverlayCurve,
}

/// Execute the full pipeline starting from an image on disk.
pub fn run_digitize(config: &DigitizeConfig) -> Result<RunOutput, AppError> {
    let image = RasterImage::open(&config.image_path)?;
    run_digitize_with_image(config, image)
}

/// Execute the pipeline with an already-decoded image.
///
/// This is what the integration tests use to run on synthetic charts.
pub fn run_digitize_with_image(
    config: &DigitizeConfig,
    image: RasterImage,
) -> Result<RunOutput, AppError> {
    // 1) Segment the curve's connected component around the seed.
    let mask = segment::segment(&image, config.seed, &config.segment)?;
    let points = mask.points();

    // 2) Reduce to one sample per column bin.
    let reduced = crate::reduce::reduce(&points, config.bin_width)?;

    // 3) Map pixel samples into data coordinates via the axis calibration.
    let curve = calib::calibrate(&reduced, &config.bounds)?;

    // 4) Fit the power law in log-log space.
    let fit = crate::fit::fit_power_law(&curve.data)?;

    // 5) Project the fitted curve back into pixel space over the extracted
    //    x range (fall back to the axis bounds if the extent is degenerate).
    let x_range = x_extent(&curve.data)
        .unwrap_or((config.bounds.x_min, config.bounds.x_max));
    let overlay = overlay::project(
        &fit,
        &curve.calibration,
        x_range,
        config.overlay_samples,
        (image.width(), image.height()),
    )?;

    Ok(RunOutput {
        image,
        mask_pixels: mask.count(),
        curve,
        fit,
        overlay,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AxisBounds, Connectivity, PixelPoint, SegmentOptions};

    const LINE: [u8; 3] = [10, 10, 10];
    const BG: [u8; 3] = [250, 250, 250];

    /// 100x100 chart whose curve is the main diagonal: pixel (i, i) for all i.
    ///
    /// With x spanning [1, 100] and y spanning [10, 1] top-to-bottom, the
    /// diagonal satisfies log10(y) = 1 - log10(x)/2, i.e. y = 10 * x^-0.5.
    fn diagonal_image() -> RasterImage {
        RasterImage::from_fn(100, 100, |x, y| if x == y { LINE } else { BG })
    }

    fn diagonal_config(connectivity: Connectivity) -> DigitizeConfig {
        DigitizeConfig {
            image_path: "diagonal.png".into(),
            run_name: "diagonal".into(),
            seed: PixelPoint::new(50, 50),
            segment: SegmentOptions {
                lo_diff: 5,
                up_diff: 5,
                connectivity,
            },
            bin_width: 1,
            bounds: AxisBounds {
                x_min: 1.0,
                x_max: 100.0,
                y_min: 1.0,
                y_max: 10.0,
            },
            overlay_samples: 200,
            log_path: "results.txt".into(),
            overlay_path: None,
            export_points: None,
            export_curve: None,
        }
    }

    #[test]
    fn diagonal_chart_recovers_exact_power_law() {
        let run =
            run_digitize_with_image(&diagonal_config(Connectivity::Eight), diagonal_image())
                .unwrap();

        assert_eq!(run.mask_pixels, 100);
        assert_eq!(run.curve.data.len(), 100);

        assert!((run.fit.b - (-0.5)).abs() < 1e-9, "b = {}", run.fit.b);
        assert!((run.fit.a - 10.0).abs() < 1e-6, "a = {}", run.fit.a);
        assert!((run.fit.r_value - (-1.0)).abs() < 1e-9);
        assert!(run.fit.p_value < 1e-12);
        assert!(run.fit.std_err < 1e-9);
        assert_eq!(run.fit.n, 100);
    }

    #[test]
    fn overlay_of_perfect_fit_retraces_the_diagonal() {
        let run =
            run_digitize_with_image(&diagonal_config(Connectivity::Eight), diagonal_image())
                .unwrap();

        assert_eq!(run.overlay.len(), 200);
        for p in &run.overlay.points {
            let dx = p.x as i64 - p.y as i64;
            assert!(dx.abs() <= 1, "overlay point ({}, {}) off the diagonal", p.x, p.y);
        }
    }

    #[test]
    fn four_connectivity_on_a_diagonal_fails_as_degenerate() {
        // 4-way growth cannot cross the diagonal's corner contacts, so the
        // mask is a single pixel and calibration has no pixel extent.
        let err = run_digitize_with_image(&diagonal_config(Connectivity::Four), diagonal_image())
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn out_of_bounds_seed_maps_to_parameter_error() {
        let mut config = diagonal_config(Connectivity::Eight);
        config.seed = PixelPoint::new(100, 100);
        let err = run_digitize_with_image(&config, diagonal_image()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
