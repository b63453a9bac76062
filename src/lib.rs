//! # SSIM Matrix
//!
//! Compares a set of images pairwise and reports a structural similarity
//! (SSIM) matrix as a CSV table and as a MEGA distance matrix.
//!
//! ## Architecture
//! - `core` - File list, decoding, SSIM, matrix building and writers
//! - `events` - Progress reporting for whatever UI drives the run
//! - `error` - Error types; only a failed image load is recoverable

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SsimMatrixError};

/// Initialize tracing for the library.
///
/// Called by the binary. Log output goes to stderr and is filtered by
/// `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
