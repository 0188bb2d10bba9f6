//! Rasterized visual checks: fitted-curve overlay and segmentation preview.
//!
//! All drawing happens on copies of the source raster; the pipeline itself
//! never touches pixels. The overlay polyline goes through Plotters' bitmap
//! backend so segment joins and stroke width are handled for us; the preview
//! tint is a plain per-pixel blend.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::PixelPoint;
use crate::error::AppError;
use crate::overlay::OverlayCurve;
use crate::raster::RasterImage;
use crate::segment::SegmentationMask;

const CURVE_COLOR: RGBColor = RGBColor(0, 200, 0);
const SEED_COLOR: [u8; 3] = [0, 0, 255];
const MASK_TINT: [u8; 3] = [255, 0, 0];

/// Draw the projected curve onto a copy of the source image and save it.
pub fn save_overlay_png(
    image: &RasterImage,
    overlay: &OverlayCurve,
    path: &Path,
) -> Result<(), AppError> {
    let (width, height) = (image.width(), image.height());
    let mut buf = image.as_rgb().clone().into_raw();

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        let polyline: Vec<(i32, i32)> = overlay
            .points
            .iter()
            .map(|p| (p.x as i32, p.y as i32))
            .collect();
        root.draw(&PathElement::new(polyline, CURVE_COLOR.stroke_width(2)))
            .map_err(|e| AppError::new(2, format!("Failed to draw overlay: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(2, format!("Failed to flush overlay: {e}")))?;
    }

    image::save_buffer(path, &buf, width, height, image::ExtendedColorType::Rgb8).map_err(
        |e| {
            AppError::new(
                2,
                format!("Failed to save overlay PNG '{}': {e}", path.display()),
            )
        },
    )
}

/// Tint segmented pixels and mark the seed on a copy of the image, then save.
///
/// This is the scripted stand-in for the interactive tolerance-tuning view:
/// rerun `preview` with adjusted parameters until the tint hugs the curve.
pub fn save_preview_png(
    image: &RasterImage,
    mask: &SegmentationMask,
    seed: PixelPoint,
    path: &Path,
) -> Result<(), AppError> {
    let mut canvas = image.as_rgb().clone();

    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if mask.contains(x, y) {
                let px = canvas.get_pixel_mut(x, y);
                px.0 = blend(px.0, MASK_TINT);
            }
        }
    }

    // 3x3 seed marker.
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let x = seed.x as i64 + dx;
            let y = seed.y as i64 + dy;
            if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                canvas.put_pixel(x as u32, y as u32, image::Rgb(SEED_COLOR));
            }
        }
    }

    canvas.save(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to save preview PNG '{}': {e}", path.display()),
        )
    })
}

/// 50/50 blend keeps the underlying chart readable beneath the tint.
fn blend(base: [u8; 3], tint: [u8; 3]) -> [u8; 3] {
    [
        ((base[0] as u16 + tint[0] as u16) / 2) as u8,
        ((base[1] as u16 + tint[1] as u16) / 2) as u8,
        ((base[2] as u16 + tint[2] as u16) / 2) as u8,
    ]
}
