//! Convenience helpers for loading masks via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Images are converted to
//! 8-bit luma and thresholded: `luma >= threshold` is "on", or the reverse
//! when `invert` is set.

use crate::image::ImageView;
use crate::util::{MonoMatchError, MonoMatchResult};
use crate::MonoMask;
use std::path::Path;

/// Thresholds a grayscale image buffer into a mask.
pub fn mask_from_gray_image(
    img: &image::GrayImage,
    threshold: u8,
    invert: bool,
) -> MonoMatchResult<MonoMask> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let bytes: Vec<u8> = img
        .as_raw()
        .iter()
        .map(|&luma| u8::from((luma >= threshold) != invert))
        .collect();
    let view = ImageView::from_slice(&bytes, width, height)?;
    Ok(MonoMask::from_view(view))
}

/// Converts any decoded image to luma and thresholds it into a mask.
pub fn mask_from_dynamic_image(
    img: &image::DynamicImage,
    threshold: u8,
    invert: bool,
) -> MonoMatchResult<MonoMask> {
    let gray = img.to_luma8();
    mask_from_gray_image(&gray, threshold, invert)
}

/// Loads an image from disk and thresholds it into a mask.
pub fn load_mono_image<P: AsRef<Path>>(
    path: P,
    threshold: u8,
    invert: bool,
) -> MonoMatchResult<MonoMask> {
    let img = image::open(path).map_err(|err| MonoMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    mask_from_dynamic_image(&img, threshold, invert)
}
