//! # cmpimg CLI
//!
//! Command-line interface for the SSIM matrix tool.
//!
//! ## Usage
//! ```bash
//! cmpimg scans/*.png
//! cmpimg -o clusters a.png b.png c.png.gz
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    ssim_matrix::init_tracing();
    cli::run()
}
