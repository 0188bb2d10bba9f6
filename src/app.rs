//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the segmentation/fitting pipeline
//! - prints the run summary
//! - appends the results log and writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, DigitizeArgs, PreviewArgs};
use crate::error::AppError;
use crate::raster::RasterImage;

pub mod pipeline;

/// Entry point for the `digitize` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Digitize(args) => handle_digitize(args),
        Command::Preview(args) => handle_preview(args),
    }
}

fn handle_digitize(args: DigitizeArgs) -> Result<(), AppError> {
    let config = args.to_config();
    let run = pipeline::run_digitize(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, run.mask_pixels, &run.curve, &run.fit)
    );

    crate::report::append_results_log(&config.log_path, &config, &run.fit)?;
    println!("Appended results to {}", config.log_path.display());

    // Optional exports.
    if let Some(path) = &config.overlay_path {
        crate::io::render::save_overlay_png(&run.image, &run.overlay, path)?;
        println!("Wrote overlay to {}", path.display());
    }
    if let Some(path) = &config.export_points {
        crate::io::export::write_points_csv(path, &run.curve)?;
        println!("Wrote points to {}", path.display());
    }
    if let Some(path) = &config.export_curve {
        crate::io::export::write_curve_json(path, &config, &run.fit, &run.curve.data)?;
        println!("Wrote curve to {}", path.display());
    }

    Ok(())
}

fn handle_preview(args: PreviewArgs) -> Result<(), AppError> {
    let image = RasterImage::open(&args.segment.image)?;
    let mask = crate::segment::segment(&image, args.segment.seed(), &args.segment.options())?;

    println!(
        "Segmented {} pixels from seed ({}, {})",
        mask.count(),
        args.segment.seed_x,
        args.segment.seed_y
    );

    crate::io::render::save_preview_png(&image, &mask, args.segment.seed(), &args.out)?;
    println!("Wrote preview to {}", args.out.display());

    Ok(())
}
