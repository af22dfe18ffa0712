#![allow(dead_code)]

use battlemap_vectorizer::image::RasterImage;

pub const RED: [u8; 3] = [210, 30, 25];
pub const PAPER: [u8; 3] = [236, 228, 208];

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> RasterImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = RasterImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            img.set(x, y, [val, val, val]);
        }
    }
    img
}

/// Dark grid lines of the given period and phase over a paper background.
pub fn grid_lines(width: usize, height: usize, period: usize, x_off: usize, y_off: usize) -> RasterImage {
    assert!(period > 0, "period must be positive");
    let mut img = RasterImage::filled(width, height, PAPER);
    for y in (y_off % period..height).step_by(period) {
        img.fill_rect(0, y, width, y + 1, [40, 40, 40]);
    }
    for x in (x_off % period..width).step_by(period) {
        img.fill_rect(x, 0, x + 1, height, [40, 40, 40]);
    }
    img
}

/// Paper-colored canvas with red axis-aligned bars `(x0, y0, x1, y1)`, end exclusive.
pub fn red_bars(width: usize, height: usize, bars: &[(usize, usize, usize, usize)]) -> RasterImage {
    let mut img = RasterImage::filled(width, height, PAPER);
    for &(x0, y0, x1, y1) in bars {
        img.fill_rect(x0, y0, x1, y1, RED);
    }
    img
}
