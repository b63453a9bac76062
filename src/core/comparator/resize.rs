//! Resampling of float rasters.
//!
//! Each channel is resized on its own as a `Luma<f32>` plane with the image
//! crate's triangle (bilinear) filter. The filter support grows with the
//! downscale ratio, so shrinking is anti-aliased; enlarging is plain bilinear
//! interpolation.
//!
//! `imageops::resize` clamps float samples to `[0, 1]`, so every plane is
//! mapped onto that interval by its own minimum and maximum before resizing
//! and mapped back afterwards. Samples outside `[0, 1]` (HDR, signed data)
//! survive, and the output never leaves the input's range.

use crate::core::raster::FloatImage;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};

/// Interpolation kernel used for every resize
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Resize `image` to `width x height`, keeping its channel count
pub fn resize(image: &FloatImage, width: u32, height: u32) -> FloatImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    let planes: Vec<Vec<f64>> = (0..image.channels())
        .map(|channel| resize_plane(image, &image.plane(channel), width, height))
        .collect();

    FloatImage::from_fn(width, height, image.channels(), |x, y, channel| {
        planes[channel][y as usize * width as usize + x as usize]
    })
}

fn resize_plane(image: &FloatImage, plane: &[f64], width: u32, height: u32) -> Vec<f64> {
    let pixels = width as usize * height as usize;
    let (low, high) = plane
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &v| (low.min(v), high.max(v)));

    if plane.is_empty() {
        return vec![0.0; pixels];
    }

    // Flat or non-finite planes have nothing to interpolate
    let span = high - low;
    if span == 0.0 || !span.is_finite() {
        return vec![low; pixels];
    }

    let source: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let v = plane[y as usize * image.width() as usize + x as usize];
            Luma([((v - low) / span) as f32])
        });

    imageops::resize(&source, width, height, RESAMPLE_FILTER)
        .into_raw()
        .into_iter()
        .map(|v| (low + f64::from(v) * span).clamp(low, high))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: usize) -> FloatImage {
        FloatImage::from_fn(width, height, channels, |x, y, c| {
            (x as f64 / width as f64 + y as f64 / height as f64 + c as f64 * 0.1) / 2.2
        })
    }

    #[test]
    fn resize_produces_requested_dimensions() {
        let resized = resize(&gradient(64, 48, 3), 32, 24);

        assert_eq!(resized.dimensions(), (32, 24));
        assert_eq!(resized.channels(), 3);
    }

    #[test]
    fn resize_keeps_single_channel() {
        let resized = resize(&gradient(20, 20, 1), 40, 10);

        assert_eq!(resized.dimensions(), (40, 10));
        assert_eq!(resized.channels(), 1);
    }

    #[test]
    fn resize_to_same_size_is_identity() {
        let image = gradient(16, 16, 2);
        assert_eq!(resize(&image, 16, 16), image);
    }

    #[test]
    fn constant_image_stays_constant() {
        let image = FloatImage::from_fn(30, 30, 3, |_, _, _| 0.5);
        let resized = resize(&image, 11, 13);

        assert!(resized.samples().iter().all(|v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn resize_is_deterministic() {
        let image = gradient(50, 40, 3);
        assert_eq!(resize(&image, 17, 23), resize(&image, 17, 23));
    }

    #[test]
    fn samples_outside_unit_range_survive() {
        let bright = FloatImage::from_fn(16, 16, 1, |x, y, _| (x + y) as f64 * 0.125);
        let resized = resize(&bright, 8, 8);
        let max = resized.samples().iter().cloned().fold(f64::MIN, f64::max);
        let min = resized.samples().iter().cloned().fold(f64::MAX, f64::min);

        assert!(max > 3.0, "max = {}", max);
        assert!(max <= 3.75);
        assert!(min >= 0.0);
    }

    #[test]
    fn negative_constant_plane_is_kept() {
        let image = FloatImage::from_fn(10, 10, 2, |_, _, c| if c == 0 { -0.5 } else { 2.0 });
        let resized = resize(&image, 4, 3);

        assert_eq!(resized.plane(0), vec![-0.5; 12]);
        assert_eq!(resized.plane(1), vec![2.0; 12]);
    }

    #[test]
    fn signed_gradient_keeps_its_sign() {
        let image = FloatImage::from_fn(20, 20, 1, |x, _, _| x as f64 / 19.0 * 2.0 - 1.0);
        let resized = resize(&image, 10, 10);

        assert!(resized.sample(0, 0, 0) < -0.5);
        assert!(resized.sample(9, 0, 0) > 0.5);
        assert!(resized.samples().iter().all(|v| (-1.0..=1.0).contains(v)));
    }
}
