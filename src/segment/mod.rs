//! Fixed-range flood-fill segmentation.
//!
//! Region growing from a seed pixel: a candidate joins the region iff every
//! channel lies within `[seed_c - lo_diff, seed_c + up_diff]`. The window is
//! evaluated against the *original seed color* for every candidate, never
//! against the accepting neighbor, so the region cannot drift chromatically
//! as it grows (OpenCV's `FLOODFILL_FIXED_RANGE` semantics).
//!
//! Growth is breadth-first over 4- or 8-connected neighbors with a visited
//! set, so the fill terminates in O(pixels). The mask is recomputed from
//! scratch for every (seed, tolerance) choice; tolerance changes cannot be
//! applied incrementally.

use std::collections::VecDeque;

use crate::domain::{Connectivity, PixelPoint, SegmentOptions};
use crate::error::PipelineError;
use crate::raster::RasterImage;

/// Boolean grid with the same dimensions as the source image.
///
/// Freshly allocated by [`segment`] and discarded after point extraction.
#[derive(Debug, Clone)]
pub struct SegmentationMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl SegmentationMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at (x, y) is part of the segmented region.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.idx(x, y)]
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Unique set pixels in row-major order.
    pub fn points(&self) -> Vec<PixelPoint> {
        let mut out = Vec::with_capacity(self.count());
        for y in 0..self.height {
            for x in 0..self.width {
                if self.bits[self.idx(x, y)] {
                    out.push(PixelPoint::new(x, y));
                }
            }
        }
        out
    }
}

fn in_range(color: [u8; 3], lo: [u8; 3], hi: [u8; 3]) -> bool {
    (0..3).all(|c| color[c] >= lo[c] && color[c] <= hi[c])
}

fn neighbors(x: u32, y: u32, width: u32, height: u32, connectivity: Connectivity) -> Vec<(u32, u32)> {
    let mut n = Vec::with_capacity(8);
    if x > 0 {
        n.push((x - 1, y));
    }
    if x + 1 < width {
        n.push((x + 1, y));
    }
    if y > 0 {
        n.push((x, y - 1));
    }
    if y + 1 < height {
        n.push((x, y + 1));
    }
    if connectivity == Connectivity::Eight {
        if x > 0 && y > 0 {
            n.push((x - 1, y - 1));
        }
        if x + 1 < width && y > 0 {
            n.push((x + 1, y - 1));
        }
        if x > 0 && y + 1 < height {
            n.push((x - 1, y + 1));
        }
        if x + 1 < width && y + 1 < height {
            n.push((x + 1, y + 1));
        }
    }
    n
}

/// Grow the segmented region from `seed` and return a fresh mask.
///
/// The image is read-only; the only output is the returned mask. Fails with
/// [`PipelineError::OutOfBounds`] if the seed lies outside the image.
pub fn segment(
    image: &RasterImage,
    seed: PixelPoint,
    opts: &SegmentOptions,
) -> Result<SegmentationMask, PipelineError> {
    let (width, height) = (image.width(), image.height());
    if !image.contains(seed.x, seed.y) {
        return Err(PipelineError::OutOfBounds {
            x: seed.x,
            y: seed.y,
            width,
            height,
        });
    }

    let seed_color = image.get(seed.x, seed.y);
    let lo = seed_color.map(|c| c.saturating_sub(opts.lo_diff));
    let hi = seed_color.map(|c| c.saturating_add(opts.up_diff));

    let mut mask = SegmentationMask::new(width, height);
    // Tracks every pixel ever tested, accepted or not, so each pixel is
    // examined at most once.
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();

    let seed_idx = mask.idx(seed.x, seed.y);
    visited[seed_idx] = true;
    mask.bits[seed_idx] = true;
    queue.push_back((seed.x, seed.y));

    while let Some((x, y)) = queue.pop_front() {
        for (nx, ny) in neighbors(x, y, width, height, opts.connectivity) {
            let i = mask.idx(nx, ny);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            if in_range(image.get(nx, ny), lo, hi) {
                mask.bits[i] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: [u8; 3] = [10, 10, 10];
    const BG: [u8; 3] = [250, 250, 250];

    fn opts(lo: u8, up: u8, connectivity: Connectivity) -> SegmentOptions {
        SegmentOptions {
            lo_diff: lo,
            up_diff: up,
            connectivity,
        }
    }

    /// Horizontal bar of line-colored pixels on rows 4..=5, columns 2..=7.
    fn bar_image() -> RasterImage {
        RasterImage::from_fn(10, 10, |x, y| {
            if (2..=7).contains(&x) && (4..=5).contains(&y) {
                LINE
            } else {
                BG
            }
        })
    }

    #[test]
    fn zero_tolerance_selects_exact_component() {
        let img = bar_image();
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            let mask = segment(&img, PixelPoint::new(3, 4), &opts(0, 0, connectivity)).unwrap();
            assert_eq!(mask.count(), 12);
            for p in mask.points() {
                assert_eq!(img.get(p.x, p.y), LINE);
            }
        }
    }

    #[test]
    fn growing_tolerances_never_shrink_the_mask() {
        let img = RasterImage::from_fn(16, 16, |x, y| {
            let v = (10 + 5 * ((x + y) % 8)) as u8;
            [v, v, v]
        });
        let seed = PixelPoint::new(8, 8);
        let mut prev = 0usize;
        for tol in [0u8, 5, 10, 20, 40, 80] {
            let mask = segment(&img, seed, &opts(tol, tol, Connectivity::Four)).unwrap();
            let count = mask.count();
            assert!(count >= prev, "mask shrank at tolerance {tol}");
            prev = count;
        }
    }

    #[test]
    fn fixed_range_prevents_chromatic_drift() {
        // A gradient strip: every pixel differs from its neighbor by 10 but
        // only the first few lie within the seed's fixed window.
        let img = RasterImage::from_fn(10, 1, |x, _| {
            let v = (10 * x) as u8;
            [v, v, v]
        });
        let mask = segment(&img, PixelPoint::new(0, 0), &opts(15, 15, Connectivity::Four)).unwrap();
        // Seed value 0, window [0, 15]: pixels 0 and 10 qualify, 20 does not,
        // even though each step is within the tolerance of its neighbor.
        assert_eq!(mask.count(), 2);
        assert!(mask.contains(0, 0));
        assert!(mask.contains(1, 0));
        assert!(!mask.contains(2, 0));
    }

    #[test]
    fn diagonal_requires_eight_connectivity() {
        let img = RasterImage::from_fn(20, 20, |x, y| if x == y { LINE } else { BG });
        let seed = PixelPoint::new(10, 10);

        let four = segment(&img, seed, &opts(5, 5, Connectivity::Four)).unwrap();
        assert_eq!(four.count(), 1);

        let eight = segment(&img, seed, &opts(5, 5, Connectivity::Eight)).unwrap();
        assert_eq!(eight.count(), 20);
    }

    #[test]
    fn out_of_bounds_seed_is_rejected() {
        let img = bar_image();
        let err = segment(&img, PixelPoint::new(10, 3), &opts(0, 0, Connectivity::Four)).unwrap_err();
        assert!(matches!(err, PipelineError::OutOfBounds { .. }));
    }

    #[test]
    fn tolerances_saturate_at_channel_limits() {
        let img = RasterImage::from_fn(3, 1, |x, _| match x {
            0 => [2, 2, 2],
            1 => [0, 0, 0],
            _ => [255, 255, 255],
        });
        // Window around seed value 2 with lo_diff 10 saturates at 0.
        let mask = segment(&img, PixelPoint::new(0, 0), &opts(10, 0, Connectivity::Four)).unwrap();
        assert!(mask.contains(1, 0));
        assert!(!mask.contains(2, 0));
    }

    #[test]
    fn points_are_unique_and_row_major() {
        let img = bar_image();
        let mask = segment(&img, PixelPoint::new(3, 4), &opts(0, 0, Connectivity::Four)).unwrap();
        let points = mask.points();
        let mut sorted = points.clone();
        sorted.sort_by_key(|p| (p.y, p.x));
        sorted.dedup();
        assert_eq!(points, sorted);
    }
}
