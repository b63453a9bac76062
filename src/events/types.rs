//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Matrix building events
    Matrix(MatrixEvent),
    /// Output file events
    Report(ReportEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events from the pairwise comparison loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatrixEvent {
    /// The loop is about to start
    Started { total_images: usize, total_pairs: usize },
    /// A column image was loaded and will be compared against the rows below it
    ColumnStarted { column: usize, path: PathBuf },
    /// One cell of the matrix was computed
    PairCompared(PairProgress),
    /// An image could not be loaded; its cells keep the sentinel value
    ImageSkipped { path: PathBuf, message: String },
    /// The loop finished
    Completed {
        computed_pairs: usize,
        load_failures: usize,
    },
}

/// A single computed matrix cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairProgress {
    /// Row index (always greater than `column`)
    pub row: usize,
    /// Column index
    pub column: usize,
    /// Image at the row index
    pub row_path: PathBuf,
    /// Image at the column index
    pub column_path: PathBuf,
    /// SSIM score stored in the cell
    pub score: f64,
    /// Cells computed so far, this one included
    pub completed: usize,
}

/// Events from the output writers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportEvent {
    /// An output file is being written
    Writing { path: PathBuf },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started with this many unique images
    Started { total_images: usize },
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Comparing,
    Reporting,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Unique images after deduplication
    pub total_images: usize,
    /// Matrix cells that hold a real score
    pub computed_pairs: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Comparing => write!(f, "Comparing"),
            PipelinePhase::Reporting => write!(f, "Reporting"),
        }
    }
}
