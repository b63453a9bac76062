//! # Core Module
//!
//! The comparison engine, independent of any terminal UI.
//!
//! ## Modules
//! - `files` - Deduplicated, naturally ordered inputs and their root names
//! - `raster` - Floating-point image representation
//! - `loader` - Decodes image files into rasters
//! - `comparator` - SSIM between two rasters
//! - `matrix` - The lower-triangular SSIM matrix and the loop that fills it
//! - `reporter` - CSV and MEGA writers
//! - `pipeline` - Runs the whole workflow

pub mod comparator;
pub mod files;
pub mod loader;
pub mod matrix;
pub mod pipeline;
pub mod raster;
pub mod reporter;

// Re-export commonly used types
pub use comparator::compare;
pub use files::{root_name, FileList};
pub use loader::{FileLoader, ImageLoader};
pub use matrix::{MatrixBuilder, SsimMatrix, SENTINEL};
pub use raster::FloatImage;
pub use reporter::ReportFormat;
