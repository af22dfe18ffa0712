//! Central-difference edge fields computed row-parallel with rayon.
use crate::image::{ImageF32, ImageView, ImageViewMut, RasterImage};
use rayon::prelude::*;

/// Horizontal- and vertical-gradient magnitude fields of one raster.
#[derive(Clone, Debug)]
pub struct EdgeFields {
    /// `|I[y+2,x] - I[y,x]|` averaged over channels, `(H-2) × W`.
    pub h_edges: ImageF32,
    /// `|I[y,x+2] - I[y,x]|` averaged over channels, `H × (W-2)`.
    pub v_edges: ImageF32,
}

impl EdgeFields {
    /// 1D signal along y: mean of each `h_edges` row.
    ///
    /// Index `i` describes image row `i + 1`.
    pub fn row_profile(&self) -> Vec<f32> {
        self.h_edges.row_means()
    }

    /// 1D signal along x: mean of each `v_edges` column.
    ///
    /// Index `i` describes image column `i + 1`.
    pub fn column_profile(&self) -> Vec<f32> {
        self.v_edges.column_means()
    }

    pub fn is_degenerate(&self) -> bool {
        self.h_edges.is_empty() || self.v_edges.is_empty()
    }
}

#[inline]
fn channel_mean_diff(a: [u8; 3], b: [u8; 3]) -> f32 {
    let d = a
        .iter()
        .zip(b.iter())
        .map(|(&p, &q)| (p as i32 - q as i32).unsigned_abs())
        .sum::<u32>();
    d as f32 / 3.0
}

/// Compute both edge fields of `img`.
pub fn extract_edge_fields(img: &RasterImage) -> EdgeFields {
    let w = img.width();
    let h = img.height();

    let mut h_edges = ImageF32::new(w, h.saturating_sub(2));
    if h >= 3 && w > 0 {
        h_edges
            .data
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, out)| {
                let above = img.row(y);
                let below = img.row(y + 2);
                for ((o, &a), &b) in out.iter_mut().zip(above).zip(below) {
                    *o = channel_mean_diff(b, a);
                }
            });
    }

    let vw = w.saturating_sub(2);
    let mut v_edges = ImageF32::new(vw, h);
    if vw > 0 {
        for y in 0..h {
            let src = img.row(y);
            let out = v_edges.row_mut(y);
            for (x, o) in out.iter_mut().enumerate() {
                *o = channel_mean_diff(src[x + 2], src[x]);
            }
        }
    }

    EdgeFields { h_edges, v_edges }
}
