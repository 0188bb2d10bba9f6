//! Error types.
//!
//! Failures come in two layers, mirroring how they flow through the binary:
//!
//! - [`PipelineError`]: typed failures raised synchronously at a core stage
//!   boundary (segmentation, reduction, calibration, regression). Stages never
//!   retry internally; recovery (new seed, wider tolerances, corrected axis
//!   bounds) is the caller's job.
//! - [`AppError`]: what the CLI reports — a process exit code plus a
//!   human-readable message.

use std::fmt;

/// Typed failure raised by a core pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Seed pixel lies outside the image bounds.
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// No pixels to reduce.
    EmptyInput,
    /// Zero-width pixel extent or unusable data-axis bounds.
    DegenerateRange(String),
    /// Every calibrated point came out non-finite.
    NoValidPoints,
    /// Fewer than two points left for regression.
    InsufficientPoints { n: usize },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "seed ({x}, {y}) is outside the {width}x{height} image"),
            PipelineError::EmptyInput => write!(f, "no segmented pixels to reduce"),
            PipelineError::DegenerateRange(why) => write!(f, "degenerate range: {why}"),
            PipelineError::NoValidPoints => {
                write!(f, "all points mapped to non-finite data coordinates")
            }
            PipelineError::InsufficientPoints { n } => {
                write!(f, "regression needs at least 2 points, got {n}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl PipelineError {
    /// Exit code the CLI reports for this failure.
    ///
    /// 3 = unusable parameters/input, 4 = the fit produced nothing usable.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::OutOfBounds { .. }
            | PipelineError::EmptyInput
            | PipelineError::DegenerateRange(_) => 3,
            PipelineError::NoValidPoints | PipelineError::InsufficientPoints { .. } => 4,
        }
    }
}

/// CLI-facing error: exit code + message.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
