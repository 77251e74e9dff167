//! Client-side photo preparation before upload.

use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use rand::Rng;

/// Longest edge of an uploaded photo, in pixels.
pub const MAX_DIMENSION: u32 = 1200;

/// JPEG quality factor (0-100).
pub const JPEG_QUALITY: u8 = 80;

pub const CONTENT_TYPE: &str = "image/jpeg";

const NAME_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Target size that fits inside `MAX_DIMENSION` while keeping the aspect ratio.
pub fn fit_within(width: u32, height: u32) -> (u32, u32) {
    let scale = |long: u32, short: u32| -> u32 {
        let scaled = (short as f64 * MAX_DIMENSION as f64 / long as f64).round() as u32;
        scaled.max(1)
    };

    if width > height {
        if width > MAX_DIMENSION {
            return (MAX_DIMENSION, scale(width, height));
        }
    } else if height > MAX_DIMENSION {
        return (scale(height, width), MAX_DIMENSION);
    }
    (width, height)
}

/// Decodes any supported image, downscales it and re-encodes it as JPEG.
pub fn prepare_image(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = fit_within(img.width(), img.height());

    let img = if (width, height) != (img.width(), img.height()) {
        img.resize_exact(width, height, FilterType::Triangle)
    } else {
        img
    };

    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    Ok(out)
}

/// Collision-resistant object path: `trees/<millis>-<5 random chars>.jpg`.
pub fn object_path() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..5)
        .map(|_| NAME_ALPHABET[rng.random_range(0..NAME_ALPHABET.len())] as char)
        .collect();
    format!("trees/{}-{}.jpg", Utc::now().timestamp_millis(), suffix)
}
