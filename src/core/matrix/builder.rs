//! The pairwise comparison loop.

use super::SsimMatrix;
use crate::core::comparator::compare;
use crate::core::files::FileList;
use crate::core::loader::ImageLoader;
use crate::error::{LoadError, MatrixError};
use crate::events::{null_sender, Event, EventSender, MatrixEvent, PairProgress};
use std::path::Path;
use tracing::{debug, warn};

/// Fills an [`SsimMatrix`] from a [`FileList`].
///
/// Columns are visited in ascending order and each column image is decoded
/// once, then compared against every later image (the rows), which are
/// decoded again for each column. Cell `(row, column)` always has
/// `row > column`.
///
/// An image that fails to load is skipped with a warning and its cells keep
/// the sentinel value. Images that load but cannot be compared (different
/// channel counts) abort the whole build.
pub struct MatrixBuilder<'a> {
    loader: &'a dyn ImageLoader,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(loader: &'a dyn ImageLoader) -> Self {
        Self { loader }
    }

    /// Build without progress reporting
    pub fn build(&self, files: &FileList) -> Result<SsimMatrix, MatrixError> {
        self.build_with_events(files, &null_sender())
    }

    /// Build, reporting progress and skipped images through `events`
    pub fn build_with_events(
        &self,
        files: &FileList,
        events: &EventSender,
    ) -> Result<SsimMatrix, MatrixError> {
        files.ensure_comparable()?;

        let n = files.len();
        let mut matrix = SsimMatrix::new(n);
        let mut completed = 0usize;
        let mut load_failures = 0usize;

        events.send(Event::Matrix(MatrixEvent::Started {
            total_images: n,
            total_pairs: n * (n - 1) / 2,
        }));

        for (column, column_path) in files.iter().enumerate().take(n - 1) {
            let column_image = match self.loader.load(column_path) {
                Ok(image) => image,
                Err(error) => {
                    load_failures += 1;
                    skip(column_path, &error, events);
                    continue;
                }
            };

            events.send(Event::Matrix(MatrixEvent::ColumnStarted {
                column,
                path: column_path.to_path_buf(),
            }));

            for (row, row_path) in files.iter().enumerate().skip(column + 1) {
                let row_image = match self.loader.load(row_path) {
                    Ok(image) => image,
                    Err(error) => {
                        load_failures += 1;
                        skip(row_path, &error, events);
                        continue;
                    }
                };

                let score = compare(&row_image, &column_image).map_err(|source| MatrixError::Compare {
                    row: row_path.to_path_buf(),
                    column: column_path.to_path_buf(),
                    source,
                })?;

                matrix.set(row, column, score);
                completed += 1;

                debug!(row, column, score, "compared {} with {}", row_path.display(), column_path.display());
                events.send(Event::Matrix(MatrixEvent::PairCompared(PairProgress {
                    row,
                    column,
                    row_path: row_path.to_path_buf(),
                    column_path: column_path.to_path_buf(),
                    score,
                    completed,
                })));
            }
        }

        events.send(Event::Matrix(MatrixEvent::Completed {
            computed_pairs: completed,
            load_failures,
        }));

        Ok(matrix)
    }
}

fn skip(path: &Path, error: &LoadError, events: &EventSender) {
    warn!(path = %path.display(), %error, "skipping unreadable image");
    events.send(Event::Matrix(MatrixEvent::ImageSkipped {
        path: path.to_path_buf(),
        message: error.to_string(),
    }));
}
