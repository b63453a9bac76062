//! Floating-point raster images.
//!
//! Every decoded file is normalized into a [`FloatImage`]: interleaved
//! `f64` samples, row-major, with integer formats rescaled to `[0, 1]`.
//! The channel count of the source is kept as is.

use image::DynamicImage;

/// A decoded image as a `height x width x channels` array of samples
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<f64>,
}

impl FloatImage {
    /// Build an image by evaluating `f(x, y, channel)` for every sample
    pub fn from_fn(width: u32, height: u32, channels: usize, mut f: impl FnMut(u32, u32, usize) -> f64) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize * channels);
        for y in 0..height {
            for x in 0..width {
                for channel in 0..channels {
                    samples.push(f(x, y, channel));
                }
            }
        }
        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    /// Convert a decoded image, rescaling integer samples by their type maximum
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLuma8(buffer) => Self::from_u8(width, height, 1, buffer.as_raw()),
            DynamicImage::ImageLumaA8(buffer) => Self::from_u8(width, height, 2, buffer.as_raw()),
            DynamicImage::ImageRgb8(buffer) => Self::from_u8(width, height, 3, buffer.as_raw()),
            DynamicImage::ImageRgba8(buffer) => Self::from_u8(width, height, 4, buffer.as_raw()),
            DynamicImage::ImageLuma16(buffer) => Self::from_u16(width, height, 1, buffer.as_raw()),
            DynamicImage::ImageLumaA16(buffer) => Self::from_u16(width, height, 2, buffer.as_raw()),
            DynamicImage::ImageRgb16(buffer) => Self::from_u16(width, height, 3, buffer.as_raw()),
            DynamicImage::ImageRgba16(buffer) => Self::from_u16(width, height, 4, buffer.as_raw()),
            DynamicImage::ImageRgb32F(buffer) => Self::from_f32(width, height, 3, buffer.as_raw()),
            DynamicImage::ImageRgba32F(buffer) => Self::from_f32(width, height, 4, buffer.as_raw()),
            other => Self::from_f32(width, height, 4, other.to_rgba32f().as_raw()),
        }
    }

    fn from_u8(width: u32, height: u32, channels: usize, raw: &[u8]) -> Self {
        Self {
            width,
            height,
            channels,
            samples: raw.iter().map(|&v| f64::from(v) / f64::from(u8::MAX)).collect(),
        }
    }

    fn from_u16(width: u32, height: u32, channels: usize, raw: &[u16]) -> Self {
        Self {
            width,
            height,
            channels,
            samples: raw.iter().map(|&v| f64::from(v) / f64::from(u16::MAX)).collect(),
        }
    }

    fn from_f32(width: u32, height: u32, channels: usize, raw: &[f32]) -> Self {
        Self {
            width,
            height,
            channels,
            samples: raw.iter().map(|&v| f64::from(v)).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Interleaved samples, row-major
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample at `(x, y)` in the given channel
    pub fn sample(&self, x: u32, y: u32, channel: usize) -> f64 {
        self.samples[(y as usize * self.width as usize + x as usize) * self.channels + channel]
    }

    /// Copy one channel out as a contiguous plane
    pub fn plane(&self, channel: usize) -> Vec<f64> {
        self.samples
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgba};

    #[test]
    fn rgb8_is_rescaled_to_unit_range() {
        let buffer = ImageBuffer::from_pixel(2, 2, Rgb([255u8, 0, 51]));
        let image = FloatImage::from_dynamic(&DynamicImage::ImageRgb8(buffer));

        assert_eq!(image.channels(), 3);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.sample(1, 1, 0), 1.0);
        assert_eq!(image.sample(1, 1, 1), 0.0);
        assert!((image.sample(1, 1, 2) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn grayscale_keeps_a_single_channel() {
        let buffer: GrayImage = ImageBuffer::from_pixel(3, 1, Luma([128u8]));
        let image = FloatImage::from_dynamic(&DynamicImage::ImageLuma8(buffer));

        assert_eq!(image.channels(), 1);
        assert_eq!(image.samples().len(), 3);
    }

    #[test]
    fn sixteen_bit_uses_full_range() {
        let buffer = ImageBuffer::from_pixel(1, 1, Rgba([65535u16, 0, 0, 65535]));
        let image = FloatImage::from_dynamic(&DynamicImage::ImageRgba16(buffer));

        assert_eq!(image.channels(), 4);
        assert_eq!(image.sample(0, 0, 0), 1.0);
        assert_eq!(image.sample(0, 0, 3), 1.0);
    }

    #[test]
    fn planes_are_split_by_channel() {
        let image = FloatImage::from_fn(4, 3, 3, |x, y, c| (x + 10 * y + 100 * c as u32) as f64);
        let planes: Vec<_> = (0..3).map(|c| image.plane(c)).collect();

        assert_eq!(planes[2][0], 200.0);
        assert_eq!(planes[1][4 + 1], 111.0);
        assert!(planes.iter().all(|plane| plane.len() == 12));
    }

    #[test]
    fn float_samples_are_kept_as_decoded() {
        let buffer = ImageBuffer::from_pixel(1, 1, Rgb([3.75f32, -0.5, 0.25]));
        let image = FloatImage::from_dynamic(&DynamicImage::ImageRgb32F(buffer));

        assert_eq!(image.sample(0, 0, 0), 3.75);
        assert_eq!(image.sample(0, 0, 1), -0.5);
    }
}
