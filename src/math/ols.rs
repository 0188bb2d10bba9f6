//! Least squares solver.
//!
//! The log-log regression is a two-column problem (intercept + slope), but we
//! still solve it through an SVD rather than hand-derived normal equations:
//!
//! - SVD stays robust when the design matrix is tall (many reduced samples).
//! - A curve digitized from a very narrow x span produces a nearly constant
//!   `log10(x)` column; the SVD tolerance handling degrades gracefully where
//!   normal equations would blow up.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
