//! Power-law regression in log-log space.
//!
//! `y = a * x^b` linearizes exactly under log10:
//!
//! ```text
//! log10(y) = log10(a) + b * log10(x)
//! ```
//!
//! so a single closed-form OLS solve recovers both parameters — no iterative
//! optimization and no partial-success mode: the fit either produces a
//! complete result or fails.

use nalgebra::{DMatrix, DVector};

use crate::domain::{DataPoint, PowerLawFit};
use crate::error::PipelineError;
use crate::math::{regression_stats, solve_least_squares};

/// Fit `y = a * x^b` by ordinary least squares of log10(y) on log10(x).
///
/// Calibration guarantees strictly positive coordinates; points whose
/// logarithm is still non-finite (float underflow to zero) are excluded.
/// Fails with [`PipelineError::InsufficientPoints`] when fewer than two
/// points remain.
pub fn fit_power_law(points: &[DataPoint]) -> Result<PowerLawFit, PipelineError> {
    if points.len() < 2 {
        return Err(PipelineError::InsufficientPoints { n: points.len() });
    }

    let mut xs = Vec::with_capacity(points.len());
    let mut ys = Vec::with_capacity(points.len());
    for p in points {
        let lx = p.x.log10();
        let ly = p.y.log10();
        if lx.is_finite() && ly.is_finite() {
            xs.push(lx);
            ys.push(ly);
        }
    }
    if xs.len() < 2 {
        return Err(PipelineError::InsufficientPoints { n: xs.len() });
    }

    let n = xs.len();
    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &lx) in xs.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = lx;
    }
    let rhs = DVector::from_column_slice(&ys);

    let beta = solve_least_squares(&design, &rhs).ok_or_else(|| {
        PipelineError::DegenerateRange(
            "log-log design matrix is too ill-conditioned to solve".into(),
        )
    })?;

    let intercept = beta[0];
    let slope = beta[1];
    let stats = regression_stats(&xs, &ys, slope, intercept);

    Ok(PowerLawFit {
        a: 10f64.powf(intercept),
        b: slope,
        intercept,
        r_value: stats.r_value,
        p_value: stats.p_value,
        std_err: stats.std_err,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn power_law_points(a: f64, b: f64, xs: &[f64]) -> Vec<DataPoint> {
        xs.iter()
            .map(|&x| DataPoint { x, y: a * x.powf(b) })
            .collect()
    }

    #[test]
    fn recovers_known_parameters_exactly() {
        let points = power_law_points(2.0, -0.5, &[1.0, 10.0, 100.0, 1000.0]);
        let fit = fit_power_law(&points).unwrap();

        assert!((fit.b + 0.5).abs() < 1e-6);
        assert!((fit.a - 2.0).abs() < 1e-6);
        assert!((fit.r_value.abs() - 1.0).abs() < 1e-9);
        assert!(fit.p_value < 1e-9);
        assert!(fit.std_err < 1e-9);
        assert_eq!(fit.n, 4);
    }

    #[test]
    fn recovers_parameters_under_small_noise() {
        let mut rng = StdRng::seed_from_u64(7);
        let xs: Vec<f64> = (0..60).map(|i| 10f64.powf(i as f64 / 20.0)).collect();
        let points: Vec<DataPoint> = xs
            .iter()
            .map(|&x| {
                let jitter = 1.0 + rng.gen_range(-0.01..0.01);
                DataPoint {
                    x,
                    y: 3.0 * x.powf(1.25) * jitter,
                }
            })
            .collect();

        let fit = fit_power_law(&points).unwrap();
        assert!((fit.b - 1.25).abs() < 0.01);
        assert!((fit.a - 3.0).abs() < 0.1);
        assert!(fit.r_value > 0.999);
        assert!(fit.p_value < 1e-12);
    }

    #[test]
    fn single_point_is_insufficient() {
        let points = power_law_points(1.0, 1.0, &[10.0]);
        assert_eq!(
            fit_power_law(&points).unwrap_err(),
            PipelineError::InsufficientPoints { n: 1 }
        );
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert_eq!(
            fit_power_law(&[]).unwrap_err(),
            PipelineError::InsufficientPoints { n: 0 }
        );
    }

    #[test]
    fn increasing_power_law_correlates_positively() {
        let points = power_law_points(0.5, 2.0, &[1.0, 2.0, 5.0, 20.0, 80.0]);
        let fit = fit_power_law(&points).unwrap();
        assert!((fit.r_value - 1.0).abs() < 1e-9);
        assert!((fit.b - 2.0).abs() < 1e-9);
    }
}
