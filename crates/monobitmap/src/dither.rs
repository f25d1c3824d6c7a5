//! Floyd-Steinberg error-diffusion quantization to a two-level image.

use image::GrayImage;
use tracing::debug;

/// Number of output intensity levels. The pipeline targets 1-bpp displays,
/// so this is fixed at 2 (black and white).
const LEVELS: u32 = 2;

/// Apply Floyd-Steinberg dithering to a grayscale image.
///
/// Intensities are normalized to [0, 1] and processed in strict raster
/// order; each cell is snapped to the nearest of the two levels and its
/// quantization error diffused forward:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
///
/// Shares that would land outside the grid are dropped, so border pixels
/// receive no correction beyond what interior neighbors push into them.
/// After the pass the buffer is rescaled once, globally, by its maximum
/// into the 0-255 display range.
pub fn floyd_steinberg_dither(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    let mut buffer: Vec<Vec<f32>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| f32::from(img.get_pixel(x, y).0[0]) / 255.0)
                .collect()
        })
        .collect();

    error_diffusion_pass(&mut buffer);

    // Accumulated error can leave the quantized maximum above 1.0; correct
    // for the drift with a single buffer-wide rescale, never per pixel.
    let max = buffer
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(0.0_f32, f32::max);

    let mut output = GrayImage::new(width, height);
    if max > 0.0 {
        for y in 0..height {
            for x in 0..width {
                let val = (buffer[y as usize][x as usize] / max * 255.0) as u8;
                output.put_pixel(x, y, image::Luma([val]));
            }
        }
    }

    debug!("Floyd-Steinberg dithering complete");
    output
}

/// Run the raster-order quantize-and-diffuse pass in place.
///
/// The forward dependency is strict: diffusion writes into the current
/// row's next column and into the row below, so no cell may be visited out
/// of order. Leaves every cell at a multiple of `1 / (LEVELS - 1)`.
fn error_diffusion_pass(buffer: &mut [Vec<f32>]) {
    let height = buffer.len();
    let width = buffer.first().map_or(0, Vec::len);

    for y in 0..height {
        for x in 0..width {
            let old = buffer[y][x];
            let new = quantize(old);
            buffer[y][x] = new;

            distribute_error(buffer, x, y, width, height, old - new);
        }
    }
}

/// Snap a normalized intensity to the nearest of the output levels.
fn quantize(value: f32) -> f32 {
    let steps = (LEVELS - 1) as f32;
    (value * steps).round() / steps
}

/// Distribute quantization error to the unvisited neighbors.
fn distribute_error(
    buffer: &mut [Vec<f32>],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    error: f32,
) {
    // Right: 7/16
    if x + 1 < width {
        buffer[y][x + 1] += error * 7.0 / 16.0;
    }
    // Bottom-left: 3/16
    if x > 0 && y + 1 < height {
        buffer[y + 1][x - 1] += error * 3.0 / 16.0;
    }
    // Bottom: 5/16
    if y + 1 < height {
        buffer[y + 1][x] += error * 5.0 / 16.0;
    }
    // Bottom-right: 1/16
    if x + 1 < width && y + 1 < height {
        buffer[y + 1][x + 1] += error / 16.0;
    }
}
