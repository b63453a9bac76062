//! Windowed structural similarity (Wang et al., 2004).
//!
//! Local statistics come from a 7x7 uniform window with sample covariance.
//! Only windows that fit entirely inside the image contribute, which is the
//! same as cropping a 3-pixel border off the full SSIM map. Per-channel means
//! are averaged into the final score.

use crate::core::raster::FloatImage;
use crate::error::CompareError;

/// Side of the square averaging window
pub const WINDOW_SIZE: usize = 7;

/// Dynamic range of a float image whose samples may span `[-1, 1]`
pub const DATA_RANGE: f64 = 2.0;

const K1: f64 = 0.01;
const K2: f64 = 0.03;

/// Mean SSIM of two images with identical dimensions and channel counts.
///
/// Use [`compare`](super::compare) for images of different sizes.
pub fn structural_similarity(first: &FloatImage, second: &FloatImage) -> Result<f64, CompareError> {
    if first.channels() != second.channels() {
        return Err(CompareError::ChannelMismatch {
            left: first.channels(),
            right: second.channels(),
        });
    }
    if first.dimensions() != second.dimensions() {
        return Err(CompareError::SizeMismatch {
            left: first.dimensions(),
            right: second.dimensions(),
        });
    }

    let (width, height) = first.dimensions();
    if (width as usize) < WINDOW_SIZE || (height as usize) < WINDOW_SIZE {
        return Err(CompareError::TooSmall {
            width,
            height,
            window: WINDOW_SIZE,
        });
    }

    let channels = first.channels();
    let total: f64 = (0..channels)
        .map(|channel| {
            channel_ssim(
                &first.plane(channel),
                &second.plane(channel),
                width as usize,
                height as usize,
            )
        })
        .sum();

    Ok(total / channels as f64)
}

fn channel_ssim(x: &[f64], y: &[f64], width: usize, height: usize) -> f64 {
    let sum_x = IntegralImage::new(width, height, |i| x[i]);
    let sum_y = IntegralImage::new(width, height, |i| y[i]);
    let sum_xx = IntegralImage::new(width, height, |i| x[i] * x[i]);
    let sum_yy = IntegralImage::new(width, height, |i| y[i] * y[i]);
    let sum_xy = IntegralImage::new(width, height, |i| x[i] * y[i]);

    let np = (WINDOW_SIZE * WINDOW_SIZE) as f64;
    let cov_norm = np / (np - 1.0);
    let c1 = (K1 * DATA_RANGE).powi(2);
    let c2 = (K2 * DATA_RANGE).powi(2);

    let mut total = 0.0;
    let mut count = 0usize;

    for top in 0..=height - WINDOW_SIZE {
        for left in 0..=width - WINDOW_SIZE {
            let ux = sum_x.window(top, left) / np;
            let uy = sum_y.window(top, left) / np;
            let uxx = sum_xx.window(top, left) / np;
            let uyy = sum_yy.window(top, left) / np;
            let uxy = sum_xy.window(top, left) / np;

            let vx = cov_norm * (uxx - ux * ux);
            let vy = cov_norm * (uyy - uy * uy);
            let vxy = cov_norm * (uxy - ux * uy);

            let a1 = 2.0 * ux * uy + c1;
            let a2 = 2.0 * vxy + c2;
            let b1 = ux * ux + uy * uy + c1;
            let b2 = vx + vy + c2;

            total += (a1 * a2) / (b1 * b2);
            count += 1;
        }
    }

    total / count as f64
}

/// Summed-area table for O(1) window sums
struct IntegralImage {
    stride: usize,
    table: Vec<f64>,
}

impl IntegralImage {
    fn new(width: usize, height: usize, value: impl Fn(usize) -> f64) -> Self {
        let stride = width + 1;
        let mut table = vec![0.0; stride * (height + 1)];
        for row in 0..height {
            let mut running = 0.0;
            for col in 0..width {
                running += value(row * width + col);
                table[(row + 1) * stride + col + 1] = table[row * stride + col + 1] + running;
            }
        }
        Self { stride, table }
    }

    /// Sum of the `WINDOW_SIZE x WINDOW_SIZE` block with the given top-left corner
    fn window(&self, top: usize, left: usize) -> f64 {
        let bottom = top + WINDOW_SIZE;
        let right = left + WINDOW_SIZE;
        self.table[bottom * self.stride + right] - self.table[top * self.stride + right]
            - self.table[bottom * self.stride + left]
            + self.table[top * self.stride + left]
    }
}
