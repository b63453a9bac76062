//! # Matrix Module
//!
//! Square similarity matrix with lower-triangular storage.
//!
//! Only cells with `row > column` ever hold a score. Every other cell, and
//! every lower cell whose pair could not be computed, reads as [`SENTINEL`],
//! a value outside the SSIM range.

mod builder;

pub use builder::MatrixBuilder;

/// Value reported for cells without a score
pub const SENTINEL: f64 = -10.0;

/// `n x n` SSIM matrix, populated below the diagonal only
#[derive(Debug, Clone, PartialEq)]
pub struct SsimMatrix {
    size: usize,
    cells: Vec<Option<f64>>,
}

impl SsimMatrix {
    /// Create a matrix with every cell unset
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Store a score. Only strictly-lower cells can be written.
    pub(crate) fn set(&mut self, row: usize, column: usize, score: f64) {
        assert!(
            row > column && row < self.size,
            "cell ({}, {}) is outside the lower triangle of a {}x{} matrix",
            row,
            column,
            self.size,
            self.size
        );
        self.cells[row * self.size + column] = Some(score);
    }

    /// The computed score, if any
    pub fn score(&self, row: usize, column: usize) -> Option<f64> {
        self.cells[row * self.size + column]
    }

    /// The cell value, [`SENTINEL`] when nothing was computed
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.score(row, column).unwrap_or(SENTINEL)
    }

    /// Number of cells holding a score
    pub fn computed_pairs(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
