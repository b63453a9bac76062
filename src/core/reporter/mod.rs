//! # Reporter Module
//!
//! Serializes a finished similarity matrix.
//!
//! ## Formats
//! - **CSV** (`.csv`): raw SSIM values, one row per image
//! - **MEGA** (`.meg`): `abs(1 - SSIM)` distances in the lower-left layout
//!   read by phylogenetics and dendrogram tools
//!
//! Both writers only read the matrix; cells above the diagonal are blank.

mod csv;
mod mega;

pub use csv::write_csv;
pub use mega::{distance, format_general, write_mega};

use crate::core::files::FileList;
use crate::core::matrix::SsimMatrix;
use crate::error::ReportError;
use crate::events::{Event, EventSender, ReportEvent};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output formats, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Mega,
}

impl ReportFormat {
    /// Every format, in writing order
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Csv, ReportFormat::Mega];

    /// File extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Mega => "meg",
        }
    }

    /// `<base>.<extension>`; dots already in `base` are kept
    pub fn output_path(self, base: &Path) -> PathBuf {
        let mut name: OsString = base.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }

    /// Serialize `matrix` in this format
    pub fn write<W: Write>(self, files: &FileList, matrix: &SsimMatrix, writer: W) -> std::io::Result<()> {
        match self {
            ReportFormat::Csv => write_csv(files, matrix, writer),
            ReportFormat::Mega => write_mega(files, matrix, writer),
        }
    }
}

/// Write every format next to `base` and return the created paths
pub fn write_reports(
    base: &Path,
    files: &FileList,
    matrix: &SsimMatrix,
    events: &EventSender,
) -> Result<Vec<PathBuf>, ReportError> {
    ReportFormat::ALL
        .iter()
        .map(|format| {
            let path = format.output_path(base);
            events.send(Event::Report(ReportEvent::Writing { path: path.clone() }));
            write_file(*format, &path, files, matrix)?;
            tracing::info!(path = %path.display(), "wrote report");
            Ok(path)
        })
        .collect()
}

fn write_file(format: ReportFormat, path: &Path, files: &FileList, matrix: &SsimMatrix) -> Result<(), ReportError> {
    let to_error = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    format.write(files, matrix, &mut writer).map_err(to_error)?;
    writer.flush().map_err(to_error)
}
