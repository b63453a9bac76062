//! # Comparator Module
//!
//! Scores the structural similarity of two decoded images.
//!
//! ## How It Works
//! 1. Reject images whose channel counts differ (RGB vs grayscale, RGBA vs RGB)
//! 2. Same size: multichannel SSIM directly
//! 3. Different sizes: SSIM with the second image resized onto the first and
//!    with the first resized onto the second, averaged
//!
//! Averaging both directions cancels the bias of resampling only one side,
//! so the score does not depend on argument order.

mod resize;
mod ssim;

pub use resize::{resize, RESAMPLE_FILTER};
pub use ssim::{structural_similarity, DATA_RANGE, WINDOW_SIZE};

use crate::core::raster::FloatImage;
use crate::error::CompareError;

/// Compare two images and return their SSIM, nominally in `[-1, 1]`.
pub fn compare(first: &FloatImage, second: &FloatImage) -> Result<f64, CompareError> {
    if first.channels() != second.channels() {
        return Err(CompareError::ChannelMismatch {
            left: first.channels(),
            right: second.channels(),
        });
    }

    if first.dimensions() == second.dimensions() {
        return structural_similarity(first, second);
    }

    let (first_width, first_height) = first.dimensions();
    let (second_width, second_height) = second.dimensions();

    let onto_first = structural_similarity(first, &resize(second, first_width, first_height))?;
    let onto_second = structural_similarity(&resize(first, second_width, second_height), second)?;

    Ok((onto_first + onto_second) / 2.0)
}
