//! # CLI Module
//!
//! Command-line interface for the SSIM matrix tool.
//!
//! ## Usage
//! ```bash
//! # Compare every PNG in a directory
//! cmpimg scans/*.png
//!
//! # Custom output base name (writes clusters.csv and clusters.meg)
//! cmpimg -o clusters a.png b.png c.png.gz
//!
//! # Only warnings and errors
//! cmpimg -q a.png b.png
//! ```

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use console::{style, Term};
use ssim_matrix::core::pipeline::{Pipeline, DEFAULT_OUTPUT_BASE};
use ssim_matrix::events::{Event, EventChannel, EventReceiver, MatrixEvent, ReportEvent};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

/// Compare a set of images and report a structural similarity index (SSIM)
/// matrix, in CSV and MEGA-compatible formats.
#[derive(Parser, Debug)]
#[command(name = "cmpimg")]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Images to compare; duplicates are ignored, `.gz` files are decompressed
    #[arg(value_name = "IMAGE", required_unless_present = "version")]
    images: Vec<PathBuf>,

    /// Output files base name
    #[arg(short, long, value_name = "BASE", default_value = DEFAULT_OUTPUT_BASE)]
    output: PathBuf,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Show the program's version number and exit
    #[arg(short = 'v', long)]
    version: bool,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("cmpimg {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let pipeline = Pipeline::builder()
        .paths(cli.images)
        .output_base(cli.output)
        .build();

    // Set up event handling
    let (sender, receiver) = EventChannel::new();
    let quiet = cli.quiet;
    let event_thread = thread::spawn(move || print_progress(receiver, quiet));

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    match result {
        Ok(result) => {
            tracing::debug!(
                images = result.files.len(),
                pairs = result.matrix.computed_pairs(),
                duration_ms = result.duration_ms,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(error) if error.is_usage() => Cli::command()
            .error(ErrorKind::TooFewValues, error)
            .exit(),
        Err(error) => {
            Term::stderr()
                .write_line(&format!("{} {}", style("ERROR:").red().bold(), error))
                .ok();
            ExitCode::FAILURE
        }
    }
}

/// Progress goes to stdout, skipped images to stderr.
fn print_progress(receiver: EventReceiver, quiet: bool) {
    let out = Term::stdout();
    let err = Term::stderr();

    for event in receiver.iter() {
        match event {
            Event::Matrix(MatrixEvent::ImageSkipped { path, .. }) => {
                err.write_line(&format!(
                    "{} Can not load image {}. Ignoring it. Corresponding SSIM values will be set to -10.0",
                    style("WARNING:").yellow(),
                    path.display()
                ))
                .ok();
            }
            _ if quiet => {}
            Event::Matrix(MatrixEvent::ColumnStarted { path, .. }) => {
                out.write_line(&format!("{} vs ", path.display())).ok();
            }
            Event::Matrix(MatrixEvent::PairCompared(pair)) => {
                out.write_line(&format!(
                    "\t{}... {}",
                    pair.row_path.display(),
                    style(format!("{:.3}", pair.score)).cyan()
                ))
                .ok();
            }
            Event::Matrix(MatrixEvent::Completed { .. }) => {
                out.write_line("").ok();
            }
            Event::Report(ReportEvent::Writing { path }) => {
                out.write_line(&format!("Writing file {}", path.display())).ok();
            }
            _ => {}
        }
    }
}
