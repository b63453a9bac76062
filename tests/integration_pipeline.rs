//! Integration tests for the pipeline.
//!
//! These run real files through decoding, comparison and both writers:
//! - Identical, resized and gzip-compressed images
//! - Unreadable inputs
//! - Channel mismatches

use flate2::write::GzEncoder;
use flate2::Compression;
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use ssim_matrix::core::matrix::SENTINEL;
use ssim_matrix::core::pipeline::Pipeline;
use ssim_matrix::error::MatrixError;
use ssim_matrix::events::{Event, EventChannel, MatrixEvent};
use ssim_matrix::SsimMatrixError;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn gradient(size: u32) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| {
        Rgb([(x * 3) as u8, (y * 3) as u8, ((x + y) * 2) as u8])
    })
}

fn save(image: &RgbImage, path: &Path) {
    image.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Three images: A, an exact copy of A and A scaled down to 32x32
fn write_trio(dir: &Path) -> Vec<PathBuf> {
    let a = gradient(64);
    let c = imageops::resize(&a, 32, 32, FilterType::Triangle);

    let paths = vec![dir.join("a.png"), dir.join("b.png"), dir.join("c.png")];
    save(&a, &paths[0]);
    save(&a, &paths[1]);
    save(&c, &paths[2]);
    paths
}

#[test]
fn compares_identical_and_resized_images() {
    let temp_dir = TempDir::new().unwrap();
    let paths = write_trio(temp_dir.path());
    let base = temp_dir.path().join("ssim_matrix");

    let result = Pipeline::builder()
        .paths(paths)
        .output_base(&base)
        .build()
        .run()
        .unwrap();

    let matrix = &result.matrix;
    assert_eq!(matrix.size(), 3);
    assert!((matrix.value(1, 0) - 1.0).abs() < 1e-6);
    for (row, column) in [(2, 0), (2, 1)] {
        let score = matrix.value(row, column);
        assert_ne!(score, SENTINEL);
        assert!((-1.0..=1.0).contains(&score), "cell ({}, {}) = {}", row, column, score);
    }
    // A and B are the same pixels, so C scores the same against both
    assert!((matrix.value(2, 0) - matrix.value(2, 1)).abs() < 1e-9);
    assert_eq!(matrix.computed_pairs(), 3);

    assert_eq!(
        result.outputs,
        vec![temp_dir.path().join("ssim_matrix.csv"), temp_dir.path().join("ssim_matrix.meg")]
    );

    let csv = fs::read_to_string(&result.outputs[0]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "structures,a,b,c");
    assert_eq!(lines[1], "a,,,");
    assert_eq!(lines[2], "b,1.000000,,");
    assert!(lines.iter().all(|line| line.split(',').count() == 4));

    let meg = fs::read_to_string(&result.outputs[1]).unwrap();
    assert!(meg.starts_with("#mega\n!Title: SSIM matrix;\n"));
    assert!(meg.contains("NTaxa=3;"));
    assert!(meg.contains("[1] #a\n[2] #b\n[3] #c\n"));
    assert!(meg.contains("[ 2]           0                  \n"));
}

#[test]
fn duplicate_arguments_are_compared_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut paths = write_trio(temp_dir.path());
    paths.push(paths[0].clone());
    paths.reverse();

    let result = Pipeline::builder()
        .paths(paths)
        .output_base(temp_dir.path().join("out"))
        .build()
        .run()
        .unwrap();

    assert_eq!(result.files.len(), 3);
    assert_eq!(result.files.root_names(), vec!["a", "b", "c"]);
}

#[test]
fn gzip_compressed_images_are_decoded() {
    let temp_dir = TempDir::new().unwrap();
    let image = gradient(24);

    let plain = temp_dir.path().join("plain.png");
    save(&image, &plain);

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&png).unwrap();
    let packed = temp_dir.path().join("packed.png.gz");
    fs::write(&packed, encoder.finish().unwrap()).unwrap();

    let result = Pipeline::builder()
        .paths(vec![plain, packed])
        .output_base(temp_dir.path().join("out"))
        .build()
        .run()
        .unwrap();

    assert_eq!(result.files.root_names(), vec!["packed", "plain"]);
    assert!((result.matrix.value(1, 0) - 1.0).abs() < 1e-6);
}

#[test]
fn unreadable_image_keeps_sentinel_cells() {
    let temp_dir = TempDir::new().unwrap();
    let mut paths = write_trio(temp_dir.path());
    paths.truncate(2);

    // Sorts first, so it is both a column and never a row
    let broken = temp_dir.path().join("0_broken.png");
    fs::write(&broken, b"this is not a valid image file").unwrap();
    paths.push(broken.clone());

    let (sender, receiver) = EventChannel::new();
    let result = Pipeline::builder()
        .paths(paths)
        .output_base(temp_dir.path().join("out"))
        .build()
        .run_with_events(&sender)
        .unwrap();
    drop(sender);

    assert_eq!(result.files.get(0), Some(broken.as_path()));
    assert_eq!(result.matrix.value(1, 0), SENTINEL);
    assert_eq!(result.matrix.value(2, 0), SENTINEL);
    assert!((result.matrix.value(2, 1) - 1.0).abs() < 1e-6);

    let skipped: Vec<PathBuf> = receiver
        .iter()
        .filter_map(|event| match event {
            Event::Matrix(MatrixEvent::ImageSkipped { path, .. }) => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, vec![broken]);

    let csv = fs::read_to_string(temp_dir.path().join("out.csv")).unwrap();
    assert!(csv.contains("\na,-10.000000,,\n"));
    assert!(csv.contains("\nb,-10.000000,1.000000,\n"));

    let meg = fs::read_to_string(temp_dir.path().join("out.meg")).unwrap();
    assert!(meg.contains("[ 2]          11                  \n"));
}

#[test]
fn rgb_against_grayscale_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let rgb = temp_dir.path().join("color.png");
    let gray = temp_dir.path().join("gray.png");
    save(&gradient(16), &rgb);
    GrayImage::from_fn(16, 16, |x, y| Luma([(x * y) as u8]))
        .save_with_format(&gray, ImageFormat::Png)
        .unwrap();

    let error = Pipeline::builder()
        .paths(vec![rgb, gray])
        .output_base(temp_dir.path().join("out"))
        .build()
        .run()
        .unwrap_err();

    assert!(!error.is_usage());
    assert!(matches!(
        error,
        SsimMatrixError::Matrix(MatrixError::Compare { .. })
    ));
    assert!(!temp_dir.path().join("out.csv").exists());
    assert!(!temp_dir.path().join("out.meg").exists());
}

#[test]
fn nonexistent_paths_still_produce_reports() {
    let temp_dir = TempDir::new().unwrap();

    let result = Pipeline::builder()
        .paths(vec![
            PathBuf::from("/nonexistent/one.png"),
            PathBuf::from("/nonexistent/two.png"),
        ])
        .output_base(temp_dir.path().join("out"))
        .build()
        .run()
        .unwrap();

    assert_eq!(result.matrix.computed_pairs(), 0);
    assert_eq!(result.matrix.value(1, 0), SENTINEL);
    assert!(temp_dir.path().join("out.csv").exists());
    assert!(temp_dir.path().join("out.meg").exists());
}
