//! Owned RGB8 raster, the input of both detectors.
use image::{Rgb, RgbImage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    w: usize,
    h: usize,
    data: Vec<[u8; 3]>,
}

impl RasterImage {
    /// A black `w × h` canvas.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, [0, 0, 0])
    }

    pub fn filled(w: usize, h: usize, color: [u8; 3]) -> Self {
        Self {
            w,
            h,
            data: vec![color; w * h],
        }
    }

    /// Wrap row-major pixels; `None` when the length does not match `w × h`.
    pub fn from_pixels(w: usize, h: usize, data: Vec<[u8; 3]>) -> Option<Self> {
        (data.len() == w * h).then_some(Self { w, h, data })
    }

    pub fn from_rgb_image(img: &RgbImage) -> Self {
        Self {
            w: img.width() as usize,
            h: img.height() as usize,
            data: img.pixels().map(|p| p.0).collect(),
        }
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            Rgb(self.get(x as usize, y as usize))
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 3]) {
        self.data[y * self.w + x] = px;
    }

    /// Paint the axis-aligned rectangle `[x0, x1) × [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, px: [u8; 3]) {
        for y in y0.min(self.h)..y1.min(self.h) {
            for x in x0.min(self.w)..x1.min(self.w) {
                self.set(x, y, px);
            }
        }
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.data
    }
}

impl crate::image::traits::ImageView for RasterImage {
    type Pixel = [u8; 3];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[[u8; 3]] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
