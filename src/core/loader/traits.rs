//! Trait definitions for image sources.

use crate::core::raster::FloatImage;
use crate::error::LoadError;
use std::path::Path;

/// Source of decoded images, keyed by path
pub trait ImageLoader {
    /// Load and decode the image at `path`.
    fn load(&self, path: &Path) -> Result<FloatImage, LoadError>;
}
