//! Thumbnail generation.
//!
//! Walks the source image directory and produces one normalized JPEG per
//! source image, keyed by filename stem, into the thumbnail directory. Two
//! fit modes:
//!
//! - `cover`: scale to fill the target frame, center-cropping the overflow
//! - `contain`: scale to fit inside the frame, padded on a light-grey canvas
//!
//! All imaging is pure Rust via the `image` crate (Lanczos3 resampling).
//! Files are encoded in parallel; a single unreadable image is collected as
//! a failure, not a reason to stop the batch.

use crate::config::{ThumbMode, ThumbnailsConfig};
use crate::types::Failure;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Canvas color behind `contain`-mode thumbnails.
const CANVAS_GREY: Rgb<u8> = Rgb([245, 245, 245]);

/// Source extensions considered images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("source directory not found: {0}")]
    MissingSourceDir(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one thumbnail run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThumbReport {
    /// Thumbnails written.
    pub created: usize,
    /// Source images that could not be processed.
    pub failures: Vec<Failure>,
}

/// Generate thumbnails for every source image.
///
/// The source tree is walked recursively; output is flat, keyed by stem, so
/// `assets/images/2021/7.png` becomes `assets/thumbs/7.jpg`.
pub fn generate_thumbnails(
    root: &Path,
    config: &ThumbnailsConfig,
) -> Result<ThumbReport, ThumbError> {
    let source_dir = root.join(&config.source_dir);
    if !source_dir.is_dir() {
        return Err(ThumbError::MissingSourceDir(source_dir));
    }
    let output_dir = root.join(&config.output_dir);
    fs::create_dir_all(&output_dir)?;

    let mut sources: Vec<PathBuf> = WalkDir::new(&source_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_image(path))
        .collect();
    sources.sort();

    let results: Vec<Result<(), Failure>> = sources
        .par_iter()
        .map(|source| {
            make_thumbnail(source, &output_dir, config).map_err(|err| {
                let name = source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| source.display().to_string());
                Failure::new(name, err.to_string())
            })
        })
        .collect();

    let mut report = ThumbReport::default();
    for result in results {
        match result {
            Ok(()) => report.created += 1,
            Err(failure) => report.failures.push(failure),
        }
    }
    Ok(report)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Fit a source image into the target frame according to the mode.
fn fit_image(image: &DynamicImage, config: &ThumbnailsConfig) -> DynamicImage {
    let (w, h) = (config.width, config.height);
    match config.mode {
        ThumbMode::Cover => image.resize_to_fill(w, h, FilterType::Lanczos3),
        ThumbMode::Contain => {
            let scaled = image.resize(w, h, FilterType::Lanczos3).to_rgb8();
            let mut canvas = RgbImage::from_pixel(w, h, CANVAS_GREY);
            let x = (w.saturating_sub(scaled.width()) / 2) as i64;
            let y = (h.saturating_sub(scaled.height()) / 2) as i64;
            image::imageops::overlay(&mut canvas, &scaled, x, y);
            DynamicImage::ImageRgb8(canvas)
        }
    }
}

fn make_thumbnail(
    source: &Path,
    output_dir: &Path,
    config: &ThumbnailsConfig,
) -> image::ImageResult<()> {
    let image = image::open(source)?;
    let thumb = DynamicImage::ImageRgb8(fit_image(&image, config).to_rgb8());

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out_path = output_dir.join(format!("{stem}.jpg"));

    let file = File::create(&out_path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, config.quality);
    thumb.write_with_encoder(encoder)?;
    Ok(())
}
