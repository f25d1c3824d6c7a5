//! Grayscale reduction for decoded source images.

use image::{DynamicImage, GrayImage};
use tracing::debug;

/// Reduce a decoded image (1, 3, or 4 channels) to single-channel luminance.
///
/// Uses the `image` crate's built-in luma conversion (ITU-R BT.709 weights).
/// The exact weighting is not load-bearing: the quantizer renormalizes the
/// buffer globally before thresholding. Alpha, if present, is discarded.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    let (width, height) = (img.width(), img.height());
    debug!(width, height, "Converting to grayscale");
    img.to_luma8()
}
