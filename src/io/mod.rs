//! Input/output glue around the numeric pipeline.
//!
//! - sample/curve exports (CSV + JSON) (`export`)
//! - overlay and segmentation-preview PNG rendering (`render`)
//!
//! Image decoding lives with the raster type itself (`raster::RasterImage`).

pub mod export;
pub mod render;

pub use export::*;
pub use render::*;
