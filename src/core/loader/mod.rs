//! # Loader Module
//!
//! Turns image files into [`FloatImage`] rasters.
//!
//! The matrix builder only talks to the [`ImageLoader`] trait, so the
//! comparison loop can run against files on disk ([`FileLoader`]) or against
//! images held in memory.

pub mod fast_decode;
mod traits;

pub use fast_decode::{FastDecoder, ImageFormat};
pub use traits::ImageLoader;

use crate::core::raster::FloatImage;
use crate::error::LoadError;
use std::path::Path;

/// Loads images from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<FloatImage, LoadError> {
        let decoded = FastDecoder::decode(path)?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::trace!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            channels = decoded.color().channel_count(),
            "decoded image"
        );
        Ok(FloatImage::from_dynamic(&decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn file_loader_produces_unit_range_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgba.png");
        RgbaImage::from_pixel(10, 8, Rgba([255, 128, 0, 255]))
            .save(&path)
            .unwrap();

        let image = FileLoader::new().load(&path).unwrap();

        assert_eq!(image.dimensions(), (10, 8));
        assert_eq!(image.channels(), 4);
        assert!(image.samples().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn file_loader_reports_missing_file() {
        let result = FileLoader::new().load(Path::new("/nonexistent/a.png"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
