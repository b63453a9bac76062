//! # Error Module
//!
//! Error types for the SSIM matrix tool.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, channel counts, what went wrong
//! - **Two kinds of failure** - a single unreadable image is recovered by the
//!   matrix builder, everything else travels up to the binary's handler

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SsimMatrixError {
    #[error("{0}")]
    Matrix(#[from] MatrixError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl SsimMatrixError {
    /// Whether this error stems from how the tool was invoked
    pub fn is_usage(&self) -> bool {
        matches!(self, SsimMatrixError::Matrix(MatrixError::TooFewImages { .. }))
    }
}

/// Errors that occur while reading an image into memory.
///
/// Always recovered by the matrix builder, which skips the image.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image is empty: {path}")]
    Empty { path: PathBuf },
}

/// Errors that occur when two decoded images are compared
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error(
        "Images need to have the same number of channels to be compared ({left} vs {right}); \
         RGB cannot be compared with grayscale, nor RGBA with RGB. Convert the images first."
    )]
    ChannelMismatch { left: usize, right: usize },

    #[error("Images differ in size ({}x{} vs {}x{}); resize one first", left.0, left.1, right.0, right.1)]
    SizeMismatch { left: (u32, u32), right: (u32, u32) },

    #[error("Image of {width}x{height} pixels is smaller than the {window}x{window} SSIM window")]
    TooSmall { width: u32, height: u32, window: usize },
}

/// Errors that occur while building the similarity matrix
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("At least two unique images are required (got {found})")]
    TooFewImages { found: usize },

    #[error("Cannot compare {row} with {column}: {source}")]
    Compare {
        row: PathBuf,
        column: PathBuf,
        #[source]
        source: CompareError,
    },
}

/// Errors that occur while writing the output files
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SsimMatrixError>;
