//! Read-only RGB raster.
//!
//! The pipeline never writes to the source image: the segmenter only reads
//! pixels, and overlays/previews are drawn onto copies in `io::render`. That
//! makes repeated segmentation against the same image (e.g. while tuning
//! tolerances) trivially safe.

use std::fmt;
use std::path::Path;

use image::RgbImage;

use crate::error::AppError;

/// Immutable 3-channel raster, origin top-left.
#[derive(Clone)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    /// Decode an image file (any format the `image` crate recognizes) to RGB.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let decoded = image::open(path).map_err(|e| {
            AppError::new(2, format!("Failed to load image '{}': {e}", path.display()))
        })?;
        Ok(Self {
            pixels: decoded.to_rgb8(),
        })
    }

    /// Build a raster from a closure (synthetic fixtures, tests).
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Self {
        Self {
            pixels: RgbImage::from_fn(width, height, |x, y| image::Rgb(f(x, y))),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height()
    }

    /// Channel values at (x, y). Callers must stay in bounds.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    /// The backing RGB buffer (for rendering copies).
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_round_trips_pixels() {
        let img = RasterImage::from_fn(3, 2, |x, y| [x as u8, y as u8, 7]);
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get(2, 1), [2, 1, 7]);
        assert!(img.contains(2, 1));
        assert!(!img.contains(3, 0));
    }
}
