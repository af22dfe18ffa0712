//! Color segmentation of the trace overlay.
use super::params::TraceColor;
use crate::image::{BinaryMask, ImageView, RasterImage};

/// RGB8 → (hue in degrees `[0, 360)`, saturation `[0, 1]`, value `[0, 1]`).
pub fn rgb_to_hsv(px: [u8; 3]) -> (f32, f32, f32) {
    let r = px[0] as f32 / 255.0;
    let g = px[1] as f32 / 255.0;
    let b = px[2] as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (h, s, max)
}

impl TraceColor {
    #[inline]
    pub fn matches(&self, px: [u8; 3]) -> bool {
        let (h, s, v) = rgb_to_hsv(px);
        s >= self.min_saturation && v >= self.min_value && self.bands.iter().any(|b| b.contains(h))
    }
}

/// Mark every pixel whose color falls inside `color`.
pub fn segment_trace(img: &RasterImage, color: &TraceColor) -> BinaryMask {
    let mut mask = BinaryMask::new(img.width(), img.height());
    for (y, row) in img.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            if color.matches(px) {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), (0.0, 1.0, 1.0));
        let (h, _, _) = rgb_to_hsv([0, 255, 0]);
        assert!((h - 120.0).abs() < 1e-4);
        let (h, _, _) = rgb_to_hsv([0, 0, 255]);
        assert!((h - 240.0).abs() < 1e-4);
        let (h, s, v) = rgb_to_hsv([128, 128, 128]);
        assert_eq!((h, s), (0.0, 0.0));
        assert!((v - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn red_matches_both_sides_of_the_wrap() {
        let red = TraceColor::red();
        assert!(red.matches([230, 20, 20]));
        // Magenta-leaning red, hue ≈ 350°.
        assert!(red.matches([220, 20, 55]));
        assert!(!red.matches([20, 200, 20]));
        // Too dark / too grey.
        assert!(!red.matches([30, 0, 0]));
        assert!(!red.matches([200, 180, 180]));
    }

    #[test]
    fn segmentation_marks_only_trace_pixels() {
        let mut img = RasterImage::filled(6, 4, [240, 235, 220]);
        img.set(2, 1, [255, 0, 0]);
        img.set(3, 1, [200, 10, 10]);
        img.set(4, 2, [0, 0, 0]);
        let mask = segment_trace(&img, &TraceColor::red());
        assert_eq!(mask.iter_set().collect::<Vec<_>>(), vec![(2, 1), (3, 1)]);
    }
}
