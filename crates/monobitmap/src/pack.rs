//! Vertical byte packing into display pages.

use image::GrayImage;
use tracing::debug;

use crate::PAGE_HEIGHT;

/// Packed 1-bpp bitmap, page-major: `ceil(height / 8)` rows of `width`
/// bytes, each byte holding 8 vertically consecutive pixels of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PageGrid {
    /// Pixel width of the source bitmap.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height of the source bitmap.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of 8-row pages, `ceil(height / 8)`.
    pub fn pages(&self) -> u32 {
        self.height.div_ceil(PAGE_HEIGHT)
    }

    /// Packed byte for column `x` of page `page`.
    ///
    /// Bit `b` corresponds to pixel row `page * 8 + b`; bit 0 is the
    /// topmost row of the page (LSB-first vertical packing).
    pub fn byte(&self, page: u32, x: u32) -> u8 {
        self.data[(page * self.width + x) as usize]
    }

    /// Total byte footprint, `width * ceil(height / 8)`.
    pub fn footprint(&self) -> usize {
        self.data.len()
    }
}

/// Pack a dithered black-and-white image into page-major bytes.
///
/// Any non-zero pixel counts as white (set bit). Rows past the image
/// height in the final partial page pack as zero bits.
pub fn pack_pages(img: &GrayImage) -> PageGrid {
    let (width, height) = img.dimensions();
    let pages = height.div_ceil(PAGE_HEIGHT);
    debug!(width, height, pages, "Packing bitmap into pages");

    let mut data = Vec::with_capacity((pages * width) as usize);
    for page in 0..pages {
        for x in 0..width {
            let mut byte = 0u8;
            for bit in 0..PAGE_HEIGHT {
                let y = page * PAGE_HEIGHT + bit;
                if y < height && img.get_pixel(x, y).0[0] != 0 {
                    byte |= 1 << bit;
                }
            }
            data.push(byte);
        }
    }

    PageGrid {
        width,
        height,
        data,
    }
}

/// Transfer object handed to the source/header emitter: the packed grid
/// plus the C identifier the array is declared under.
#[derive(Debug, Clone)]
pub struct BitmapArtifact {
    pub name: String,
    pub grid: PageGrid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Deterministic pseudo-random binary image.
    fn create_pattern_image(width: u32, height: u32) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let val = if (x * 7 + y * 13) % 5 < 2 { 255 } else { 0 };
                img.put_pixel(x, y, Luma([val]));
            }
        }
        img
    }

    fn unpack(grid: &PageGrid, x: u32, y: u32) -> bool {
        let page = y / PAGE_HEIGHT;
        let bit = y % PAGE_HEIGHT;
        grid.byte(page, x) & (1 << bit) != 0
    }

    #[test]
    fn test_grid_shape() {
        let grid = pack_pages(&GrayImage::new(10, 17));
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 17);
        assert_eq!(grid.pages(), 3);
        assert_eq!(grid.footprint(), 30);
    }

    #[test]
    fn test_round_trip() {
        let img = create_pattern_image(11, 23);
        let grid = pack_pages(&img);

        for y in 0..23 {
            for x in 0..11 {
                assert_eq!(
                    unpack(&grid, x, y),
                    img.get_pixel(x, y).0[0] != 0,
                    "Mismatch at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_lsb_is_topmost_row() {
        let mut img = GrayImage::new(1, 8);
        img.put_pixel(0, 0, Luma([255]));
        assert_eq!(pack_pages(&img).byte(0, 0), 0b0000_0001);

        let mut img = GrayImage::new(1, 8);
        img.put_pixel(0, 7, Luma([255]));
        assert_eq!(pack_pages(&img).byte(0, 0), 0b1000_0000);
    }

    #[test]
    fn test_partial_page_pads_with_zeros() {
        // Height 12: the second page only covers rows 8-11; bits 4-7 must
        // stay clear even with an all-white image.
        let img = GrayImage::from_pixel(5, 12, Luma([255]));
        let grid = pack_pages(&img);

        assert_eq!(grid.pages(), 2);
        for x in 0..5 {
            assert_eq!(grid.byte(0, x), 0xFF);
            assert_eq!(grid.byte(1, x), 0x0F);
        }
    }

    #[test]
    fn test_any_nonzero_pixel_sets_bit() {
        // The dither stage can emit intermediate values when its buffer
        // maximum exceeds 1; anything non-zero still packs as white.
        let mut img = GrayImage::new(1, 8);
        img.put_pixel(0, 2, Luma([127]));
        assert_eq!(pack_pages(&img).byte(0, 0), 0b0000_0100);
    }

    #[test]
    fn test_single_column_spanning_pages() {
        let img = create_pattern_image(1, 16);
        let grid = pack_pages(&img);
        assert_eq!(grid.pages(), 2);
        for y in 0..16 {
            assert_eq!(unpack(&grid, 0, y), img.get_pixel(0, y).0[0] != 0);
        }
    }
}
