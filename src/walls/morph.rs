//! Binary morphology on trace masks with square (L∞) structuring elements.
//!
//! Each operation returns a fresh mask. A radius of zero returns an unchanged
//! copy; radii above 255 saturate.
use crate::image::BinaryMask;
use imageproc::distance_transform::Norm;
use imageproc::morphology;

#[inline]
fn radius_u8(radius: u32) -> u8 {
    radius.min(u8::MAX as u32) as u8
}

pub fn dilate(mask: &BinaryMask, radius: u32) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    BinaryMask::from_gray(morphology::dilate(mask.as_gray(), Norm::LInf, radius_u8(radius)))
}

/// Dilate then erode: fills gaps narrower than `2 * radius`.
pub fn close(mask: &BinaryMask, radius: u32) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    BinaryMask::from_gray(morphology::close(mask.as_gray(), Norm::LInf, radius_u8(radius)))
}

/// Erode then dilate: removes specks thinner than `2 * radius + 1`.
pub fn open(mask: &BinaryMask, radius: u32) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    BinaryMask::from_gray(morphology::open(mask.as_gray(), Norm::LInf, radius_u8(radius)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(mask: &mut BinaryMask, x0: usize, x1: usize, y0: usize, y1: usize) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.set(x, y, true);
            }
        }
    }

    #[test]
    fn open_removes_single_pixel_speck() {
        let mut mask = BinaryMask::new(9, 9);
        mask.set(4, 4, true);
        assert!(open(&mask, 1).is_blank());
    }

    #[test]
    fn close_bridges_a_small_gap() {
        let mut mask = BinaryMask::new(30, 9);
        bar(&mut mask, 2, 12, 3, 6);
        bar(&mut mask, 15, 28, 3, 6);
        assert!(!mask.get(13, 4));
        let closed = close(&mask, 2);
        assert!(closed.get(13, 4));
        assert!(closed.get(14, 4));
    }

    #[test]
    fn zero_radius_is_identity() {
        let mut mask = BinaryMask::new(5, 5);
        mask.set(2, 2, true);
        assert_eq!(close(&mask, 0), mask);
        assert_eq!(open(&mask, 0), mask);
        assert_eq!(dilate(&mask, 0), mask);
    }

    #[test]
    fn dilation_grows_by_the_radius() {
        let mut mask = BinaryMask::new(7, 7);
        mask.set(3, 3, true);
        let grown = dilate(&mask, 2);
        assert_eq!(grown.count(), 25);
        assert!(grown.get(1, 1) && grown.get(5, 5));
        assert!(!grown.get(0, 3));
    }
}
