//! Owned single-channel f32 image in row-major layout.
//!
//! Used for the edge-magnitude fields. A field may have zero rows or zero
//! columns when the source image is too small along one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Mean of every row (length `h`). Empty rows average to zero.
    pub fn row_means(&self) -> Vec<f32> {
        use crate::image::ImageView;
        if self.w == 0 {
            return vec![0.0; self.h];
        }
        let inv = 1.0 / self.w as f32;
        self.rows().map(|r| r.iter().sum::<f32>() * inv).collect()
    }

    /// Mean of every column (length `w`). Empty columns average to zero.
    pub fn column_means(&self) -> Vec<f32> {
        use crate::image::ImageView;
        let mut acc = vec![0.0f32; self.w];
        if self.h == 0 {
            return acc;
        }
        for row in self.rows() {
            for (a, &v) in acc.iter_mut().zip(row) {
                *a += v;
            }
        }
        let inv = 1.0 / self.h as f32;
        acc.iter_mut().for_each(|a| *a *= inv);
        acc
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_and_column_means() {
        let mut img = ImageF32::new(3, 2);
        img.data.copy_from_slice(&[1.0, 2.0, 3.0, 3.0, 4.0, 5.0]);
        assert_eq!(img.row_means(), vec![2.0, 4.0]);
        assert_eq!(img.column_means(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn empty_axes_do_not_divide_by_zero() {
        let img = ImageF32::new(0, 4);
        assert_eq!(img.row_means(), vec![0.0; 4]);
        assert!(img.column_means().is_empty());
    }
}
