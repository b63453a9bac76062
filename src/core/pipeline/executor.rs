//! Pipeline execution implementation.

use crate::core::files::FileList;
use crate::core::loader::{FileLoader, ImageLoader};
use crate::core::matrix::{MatrixBuilder, SsimMatrix};
use crate::core::reporter::write_reports;
use crate::error::Result;
use crate::events::{null_sender, Event, EventSender, PipelineEvent, PipelinePhase, PipelineSummary};
use std::path::PathBuf;
use std::time::Instant;

/// Base name of the output files when none is given
pub const DEFAULT_OUTPUT_BASE: &str = "ssim_matrix";

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Unique inputs in matrix order
    pub files: FileList,
    /// The finished matrix
    pub matrix: SsimMatrix,
    /// Files written, CSV first
    pub outputs: Vec<PathBuf>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Images to compare, duplicates allowed
    pub paths: Vec<PathBuf>,
    /// Output files are `<output_base>.csv` and `<output_base>.meg`
    pub output_base: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            output_base: PathBuf::from(DEFAULT_OUTPUT_BASE),
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    loader: Option<Box<dyn ImageLoader>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            loader: None,
        }
    }

    /// Set the images to compare
    pub fn paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.paths = paths;
        self
    }

    /// Set the output base name
    pub fn output_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.config.output_base = base.into();
        self
    }

    /// Replace the filesystem loader
    pub fn loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
            loader: self.loader.unwrap_or_else(|| Box::new(FileLoader::new())),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The comparison pipeline
pub struct Pipeline {
    config: PipelineConfig,
    loader: Box<dyn ImageLoader>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult> {
        let start_time = Instant::now();

        let files = FileList::new(self.config.paths.iter().cloned());
        files.ensure_comparable()?;

        events.send(Event::Pipeline(PipelineEvent::Started {
            total_images: files.len(),
        }));

        // Phase 1: Comparing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Comparing,
        }));

        let matrix = MatrixBuilder::new(self.loader.as_ref()).build_with_events(&files, events)?;

        // Phase 2: Reporting
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Reporting,
        }));

        let outputs = write_reports(&self.config.output_base, &files, &matrix, events)?;

        let duration_ms = start_time.elapsed().as_millis() as u64;

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_images: files.len(),
                computed_pairs: matrix.computed_pairs(),
                duration_ms,
            },
        }));

        Ok(PipelineResult {
            files,
            matrix,
            outputs,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MatrixError, SsimMatrixError};
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn builder_defaults_output_base() {
        let pipeline = Pipeline::builder()
            .paths(vec![PathBuf::from("a.png"), PathBuf::from("b.png")])
            .build();

        assert_eq!(pipeline.config().output_base, Path::new("ssim_matrix"));
        assert_eq!(pipeline.config().paths.len(), 2);
    }

    #[test]
    fn single_unique_image_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("out");

        let pipeline = Pipeline::builder()
            .paths(vec![PathBuf::from("a.png"), PathBuf::from("a.png")])
            .output_base(&base)
            .build();

        let error = pipeline.run().unwrap_err();
        assert!(error.is_usage());
        assert!(matches!(
            error,
            SsimMatrixError::Matrix(MatrixError::TooFewImages { found: 1 })
        ));
        assert!(!dir.path().join("out.csv").exists());
        assert!(!dir.path().join("out.meg").exists());
    }
}
