//! Binary mask stored as a 0/255 luma buffer.
//!
//! Backing the mask with `image::GrayImage` lets the morphology stage hand it
//! to `imageproc` without copying into another layout.
use image::{GrayImage, Luma};

const ON: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    inner: GrayImage,
}

impl BinaryMask {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            inner: GrayImage::new(w as u32, h as u32),
        }
    }

    /// Any non-zero luma counts as set.
    pub fn from_gray(gray: GrayImage) -> Self {
        let mut inner = gray;
        for p in inner.pixels_mut() {
            p.0[0] = if p.0[0] > 0 { ON } else { 0 };
        }
        Self { inner }
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.inner
    }

    pub fn into_gray(self) -> GrayImage {
        self.inner
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.inner.get_pixel(x as u32, y as u32).0[0] != 0
    }

    /// Like [`get`](Self::get) but out-of-bounds coordinates read as unset.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as u32) < self.inner.width()
            && (y as u32) < self.inner.height()
            && self.inner.get_pixel(x as u32, y as u32).0[0] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.inner
            .put_pixel(x as u32, y as u32, Luma([if on { ON } else { 0 }]));
    }

    pub fn count(&self) -> usize {
        self.inner.as_raw().iter().filter(|&&v| v != 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.inner.as_raw().iter().all(|&v| v == 0)
    }

    /// Coordinates of all set pixels in raster order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.inner.width() as usize;
        self.inner
            .as_raw()
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(i, _)| (i % w, i / w))
    }
}

impl crate::image::traits::ImageView for BinaryMask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.inner.width() as usize
    }
    #[inline]
    fn height(&self) -> usize {
        self.inner.height() as usize
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let w = self.width();
        let start = y * w;
        &self.inner.as_raw()[start..start + w]
    }
}
