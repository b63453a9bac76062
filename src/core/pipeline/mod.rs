//! # Pipeline Module
//!
//! Orchestrates a full run.
//!
//! ## Pipeline Stages
//! 1. **Collect** - Deduplicate and naturally sort the input paths
//! 2. **Compare** - Fill the lower triangle of the SSIM matrix
//! 3. **Report** - Write `<base>.csv` and `<base>.meg`
//!
//! Output files are only created once the matrix is complete, so a fatal
//! error during comparison leaves nothing behind.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, DEFAULT_OUTPUT_BASE};
