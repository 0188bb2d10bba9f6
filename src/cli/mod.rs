//! Command-line parsing for the log-log chart digitizer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the segmentation/fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    AxisBounds, Connectivity, DigitizeConfig, PixelPoint, SegmentOptions,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "digitize", version, about = "Log-log chart digitizer and power-law fitter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Segment a curve, calibrate it against the axes, fit y = A * x^B, and
    /// append the results to the run log.
    Digitize(DigitizeArgs),
    /// Render the segmentation mask as a tinted PNG without fitting.
    ///
    /// Use this to tune the seed point and tolerances before a full run.
    Preview(PreviewArgs),
}

/// Options shared by every command that segments the image.
#[derive(Debug, Parser, Clone)]
pub struct SegmentArgs {
    /// Chart image to digitize (any format the `image` crate decodes).
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Seed pixel column (x grows rightward).
    #[arg(long)]
    pub seed_x: u32,

    /// Seed pixel row (y grows downward).
    #[arg(long)]
    pub seed_y: u32,

    /// Per-channel tolerance below the seed color.
    #[arg(long, default_value_t = 20)]
    pub lo_diff: u8,

    /// Per-channel tolerance above the seed color.
    #[arg(long, default_value_t = 20)]
    pub up_diff: u8,

    /// Pixel connectivity for the flood fill.
    #[arg(long, value_enum, default_value_t = Connectivity::Four)]
    pub connectivity: Connectivity,
}

impl SegmentArgs {
    pub fn seed(&self) -> PixelPoint {
        PixelPoint::new(self.seed_x, self.seed_y)
    }

    pub fn options(&self) -> SegmentOptions {
        SegmentOptions {
            lo_diff: self.lo_diff,
            up_diff: self.up_diff,
            connectivity: self.connectivity,
        }
    }
}

/// Options for the full digitize run.
#[derive(Debug, Parser)]
pub struct DigitizeArgs {
    #[command(flatten)]
    pub segment: SegmentArgs,

    /// Label recorded with this run in the results log.
    #[arg(long, default_value = "default")]
    pub run_name: String,

    /// Column bin width in pixels for curve reduction.
    #[arg(long, default_value_t = 5)]
    pub bin_width: u32,

    /// Data value at the left edge of the plot area.
    #[arg(long)]
    pub x_min: f64,

    /// Data value at the right edge of the plot area.
    #[arg(long)]
    pub x_max: f64,

    /// Data value at the bottom edge of the plot area.
    #[arg(long)]
    pub y_min: f64,

    /// Data value at the top edge of the plot area.
    #[arg(long)]
    pub y_max: f64,

    /// Number of log-uniform samples for the fitted-curve overlay.
    #[arg(long, default_value_t = 500)]
    pub samples: usize,

    /// Append-only results log.
    #[arg(long, default_value = "results.txt")]
    pub log: PathBuf,

    /// Write the source image with the fitted curve drawn on top.
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Export reduced samples (pixel + data coordinates) to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fit (parameters + sampled grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

impl DigitizeArgs {
    pub fn to_config(&self) -> DigitizeConfig {
        DigitizeConfig {
            image_path: self.segment.image.clone(),
            run_name: self.run_name.clone(),
            seed: self.segment.seed(),
            segment: self.segment.options(),
            bin_width: self.bin_width,
            bounds: AxisBounds {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            },
            overlay_samples: self.samples,
            log_path: self.log.clone(),
            overlay_path: self.overlay.clone(),
            export_points: self.export.clone(),
            export_curve: self.export_curve.clone(),
        }
    }
}

/// Options for the segmentation preview.
#[derive(Debug, Parser)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub segment: SegmentArgs,

    /// Output PNG path.
    #[arg(long, default_value = "preview.png")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digitize_args_parse_with_defaults() {
        let cli = Cli::try_parse_from([
            "digitize", "digitize", "chart.png", "--seed-x", "120", "--seed-y", "80",
            "--x-min", "1", "--x-max", "100", "--y-min", "0.1", "--y-max", "10",
        ])
        .unwrap();

        let Command::Digitize(args) = cli.command else {
            panic!("expected digitize subcommand");
        };
        let config = args.to_config();
        assert_eq!(config.seed, PixelPoint::new(120, 80));
        assert_eq!(config.segment.lo_diff, 20);
        assert_eq!(config.segment.connectivity, Connectivity::Four);
        assert_eq!(config.bin_width, 5);
        assert_eq!(config.overlay_samples, 500);
        assert_eq!(config.log_path, PathBuf::from("results.txt"));
        assert!(config.overlay_path.is_none());
    }

    #[test]
    fn connectivity_accepts_numeric_names() {
        let cli = Cli::try_parse_from([
            "digitize", "preview", "chart.png", "--seed-x", "1", "--seed-y", "2",
            "--connectivity", "8",
        ])
        .unwrap();

        let Command::Preview(args) = cli.command else {
            panic!("expected preview subcommand");
        };
        assert_eq!(args.segment.connectivity, Connectivity::Eight);
        assert_eq!(args.out, PathBuf::from("preview.png"));
    }
}
