//! Convenience helpers for loading and binarizing images via the `image`
//! crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::Bitmap;
use crate::util::{ChamferMatchError, ChamferMatchResult};
use std::path::Path;

/// Binarizes a grayscale image buffer: pixels strictly darker than
/// `threshold` become foreground.
pub fn binarize_gray_image(img: &image::GrayImage, threshold: u8) -> ChamferMatchResult<Bitmap> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .as_raw()
        .iter()
        .map(|&value| u8::from(value < threshold))
        .collect();
    Bitmap::from_vec(data, width, height)
}

/// Loads an image from disk, converts it to grayscale, and binarizes it.
pub fn load_binary_image<P: AsRef<Path>>(path: P, threshold: u8) -> ChamferMatchResult<Bitmap> {
    let img = image::open(path).map_err(|err| ChamferMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    binarize_gray_image(&img.to_luma8(), threshold)
}
