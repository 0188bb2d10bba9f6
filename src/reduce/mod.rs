//! Column binning: collapse the segmented pixel cloud to a thin curve.
//!
//! The raw segmented region is a blob several pixels thick per column (line
//! width plus anti-aliasing). Averaging rows over fixed-width column bins
//! turns it into a roughly single-valued curve suitable for regression,
//! trading sub-pixel precision for robustness to line thickness.

use crate::domain::{PixelPoint, ReducedCurve, ReducedSample};
use crate::error::PipelineError;

/// Partition `[min x, max x]` into `bin_width`-wide bins and emit one
/// `(bin midpoint, mean row)` sample per non-empty bin, sorted by x.
///
/// A pixel belongs to bin `(x - x_min) / bin_width`. Empty bins are skipped,
/// never interpolated. Fails with [`PipelineError::EmptyInput`] on an empty
/// point set and [`PipelineError::DegenerateRange`] on a zero bin width.
pub fn reduce(points: &[PixelPoint], bin_width: u32) -> Result<ReducedCurve, PipelineError> {
    if bin_width == 0 {
        return Err(PipelineError::DegenerateRange(
            "bin width must be positive".into(),
        ));
    }
    let x_min = match points.iter().map(|p| p.x).min() {
        Some(v) => v,
        None => return Err(PipelineError::EmptyInput),
    };
    let x_max = points.iter().map(|p| p.x).max().unwrap_or(x_min);

    // The +1 keeps a point sitting exactly at x_max when the span is a
    // multiple of the bin width: it opens one extra bin rather than being
    // dropped, so the sample count can be span/bin_width + 1.
    let n_bins = ((x_max - x_min) / bin_width + 1) as usize;
    let mut sums = vec![0.0f64; n_bins];
    let mut counts = vec![0usize; n_bins];
    for p in points {
        let idx = ((p.x - x_min) / bin_width) as usize;
        sums[idx] += p.y as f64;
        counts[idx] += 1;
    }

    let w = bin_width as f64;
    let mut samples = Vec::new();
    for (idx, (&sum, &count)) in sums.iter().zip(counts.iter()).enumerate() {
        if count == 0 {
            continue;
        }
        samples.push(ReducedSample {
            x: x_min as f64 + idx as f64 * w + w / 2.0,
            y: sum / count as f64,
        });
    }

    Ok(ReducedCurve { samples })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(u32, u32)]) -> Vec<PixelPoint> {
        coords.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect()
    }

    #[test]
    fn bin_mean_is_exact() {
        // One bin of three points with rows 2, 4, 6 -> mean 4.0.
        let points = pts(&[(10, 2), (11, 4), (12, 6)]);
        let curve = reduce(&points, 5).unwrap();
        assert_eq!(curve.len(), 1);
        assert!((curve.samples[0].y - 4.0).abs() < 1e-12);
        // Midpoint of the bin starting at x_min = 10.
        assert!((curve.samples[0].x - 12.5).abs() < 1e-12);
    }

    #[test]
    fn sample_count_is_bounded_by_span() {
        let points = pts(&[(0, 1), (3, 1), (7, 1), (19, 1)]);
        let bin_width = 4;
        let curve = reduce(&points, bin_width).unwrap();
        let span = 19 - 0;
        let max_bins = span / bin_width + 1;
        assert!(curve.len() as u32 <= max_bins);
    }

    #[test]
    fn point_at_exact_span_multiple_keeps_its_own_bin() {
        // Span 10 with width 5: x = 10 sits on the boundary and gets bin 2,
        // so all three points survive as separate samples.
        let points = pts(&[(0, 1), (5, 2), (10, 3)]);
        let curve = reduce(&points, 5).unwrap();
        assert_eq!(curve.len(), 3);
        assert!((curve.samples[0].x - 2.5).abs() < 1e-12);
        assert!((curve.samples[1].x - 7.5).abs() < 1e-12);
        assert!((curve.samples[2].x - 12.5).abs() < 1e-12);
        assert!((curve.samples[2].y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_bins_are_skipped() {
        let points = pts(&[(0, 10), (1, 12), (20, 30)]);
        let curve = reduce(&points, 2).unwrap();
        assert_eq!(curve.len(), 2);
        assert!((curve.samples[0].x - 1.0).abs() < 1e-12);
        assert!((curve.samples[0].y - 11.0).abs() < 1e-12);
        assert!((curve.samples[1].x - 21.0).abs() < 1e-12);
        assert!((curve.samples[1].y - 30.0).abs() < 1e-12);
    }

    #[test]
    fn samples_sorted_by_increasing_x() {
        let points = pts(&[(30, 5), (0, 9), (15, 7), (45, 3)]);
        let curve = reduce(&points, 10).unwrap();
        for pair in curve.samples.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(reduce(&[], 5).unwrap_err(), PipelineError::EmptyInput);
    }

    #[test]
    fn zero_bin_width_is_rejected() {
        let points = pts(&[(0, 0)]);
        assert!(matches!(
            reduce(&points, 0).unwrap_err(),
            PipelineError::DegenerateRange(_)
        ));
    }
}
