//! Aspect-preserving resize to a target bitmap height.

use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::{BitmapError, Result};

/// Resize a grayscale image to a target height while maintaining aspect
/// ratio.
///
/// The new width is `round(orig_width * height / orig_height)`, clamped to
/// at least 1. Uses Lanczos3 filtering to avoid aliasing ahead of dithering.
/// Returns the image unchanged if it already matches the target height;
/// fails with [`BitmapError::InvalidSize`] for a target height of 0.
pub fn resize_to_height(img: &GrayImage, height: u32) -> Result<GrayImage> {
    if height == 0 {
        return Err(BitmapError::InvalidSize("0".into()));
    }

    let (orig_w, orig_h) = img.dimensions();
    if orig_h == height {
        debug!(height, "Image already at target height, skipping resize");
        return Ok(img.clone());
    }

    let ratio = f64::from(height) / f64::from(orig_h);
    let new_width = (f64::from(orig_w) * ratio).round() as u32;
    let new_width = new_width.max(1);

    debug!(
        orig_w,
        orig_h,
        new_width,
        new_height = height,
        "Resizing image to target height"
    );

    Ok(imageops::resize(img, new_width, height, FilterType::Lanczos3))
}
