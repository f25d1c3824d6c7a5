//! Image-to-monochrome-bitmap pipeline for page-addressed 1-bpp displays.
//!
//! Converts an arbitrary raster image into the page-major byte layout used
//! by single-page OLED drivers: grayscale reduction, aspect-preserving
//! resize, Floyd-Steinberg error-diffusion dithering, and vertical LSB-first
//! byte packing (8 stacked pixels per byte).

pub mod dither;
pub mod gray;
pub mod pack;
pub mod resize;

// Re-exports for convenience
pub use dither::floyd_steinberg_dither;
pub use gray::to_grayscale;
pub use pack::{BitmapArtifact, PageGrid, pack_pages};
pub use resize::resize_to_height;

use std::path::PathBuf;

use image::DynamicImage;
use tracing::debug;

/// Number of vertically stacked pixels per packed byte (one display page).
pub const PAGE_HEIGHT: u32 = 8;

/// Errors that can occur while converting an image to a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum BitmapError {
    #[error("input image not found: {0}")]
    InputNotFound(PathBuf),

    #[error("invalid bitmap height {0:?}: must be a positive integer")]
    InvalidSize(String),

    #[error("failed to decode input image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bitmap conversion operations.
pub type Result<T> = std::result::Result<T, BitmapError>;

/// Run the full conversion pipeline on a decoded image.
///
/// Stages run strictly left to right: grayscale reduction, optional resize
/// to `target_height` (aspect-preserving), Floyd-Steinberg dithering, and
/// page packing. Each stage hands its buffer to the next and is never
/// revisited; a failure aborts the whole run.
pub fn convert(img: &DynamicImage, target_height: Option<u32>) -> Result<PageGrid> {
    let gray = gray::to_grayscale(img);
    let gray = match target_height {
        Some(height) => resize::resize_to_height(&gray, height)?,
        None => gray,
    };
    let bw = dither::floyd_steinberg_dither(&gray);
    let grid = pack::pack_pages(&bw);
    debug!(
        width = grid.width(),
        height = grid.height(),
        pages = grid.pages(),
        "Conversion pipeline complete"
    );
    Ok(grid)
}
