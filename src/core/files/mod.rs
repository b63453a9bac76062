//! # Files Module
//!
//! The ordered list of unique input images.
//!
//! Paths are deduplicated, then sorted in natural order so `img2.png` comes
//! before `img10.png`. The resulting index of each path is its row and column
//! in the similarity matrix and in both reports.

mod natural;

pub use natural::natural_cmp;

use crate::error::MatrixError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Deduplicated, naturally ordered input paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    paths: Vec<PathBuf>,
}

impl FileList {
    /// Deduplicate and sort the given paths
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let unique: HashSet<PathBuf> = paths.into_iter().map(Into::into).collect();
        let mut paths: Vec<PathBuf> = unique.into_iter().collect();
        paths.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
        Self { paths }
    }

    /// Fail unless there is at least one pair to compare
    pub fn ensure_comparable(&self) -> Result<(), MatrixError> {
        if self.paths.len() < 2 {
            return Err(MatrixError::TooFewImages {
                found: self.paths.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Root names in list order, as used for report labels
    pub fn root_names(&self) -> Vec<String> {
        self.iter().map(root_name).collect()
    }
}

/// File name without directories and without its final extension.
///
/// When the final extension is `.gz` one more extension is removed, so
/// `image.png.gz` becomes `image` and `foo.tar.gz` becomes `foo`.
pub fn root_name(path: &Path) -> String {
    let file_name = match path.file_name() {
        Some(name) => Path::new(name),
        None => return String::new(),
    };

    let stem = file_name.file_stem().map(Path::new).unwrap_or(file_name);
    let compressed = file_name
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    let root = if compressed {
        stem.file_stem().map(Path::new).unwrap_or(stem)
    } else {
        stem
    };

    root.to_string_lossy().into_owned()
}
