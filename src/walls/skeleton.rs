//! Zhang–Suen thinning and the sparse skeleton graph.
//!
//! The skeleton is kept as a hash set of pixel coordinates; adjacency is
//! answered on demand from the 8-neighborhood, so no explicit node/edge graph
//! is ever built.
use crate::image::{BinaryMask, ImageView};
use std::collections::HashSet;

/// 8-neighborhood offsets in a fixed order: E, NE, N, NW, W, SW, S, SE.
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One-pixel-wide skeleton of a trace mask.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    width: usize,
    height: usize,
    pixels: HashSet<(i32, i32)>,
}

impl Skeleton {
    pub fn from_pixels(width: usize, height: usize, pixels: HashSet<(i32, i32)>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: (i32, i32)) -> bool {
        self.pixels.contains(&p)
    }

    /// Skeleton neighbors of `p` in [`NEIGHBORS_8`] order.
    pub fn neighbors(&self, p: (i32, i32)) -> impl Iterator<Item = (i32, i32)> + '_ {
        NEIGHBORS_8
            .iter()
            .map(move |&(dx, dy)| (p.0 + dx, p.1 + dy))
            .filter(move |q| self.pixels.contains(q))
    }

    /// Number of skeleton neighbors (0..=8).
    pub fn degree(&self, p: (i32, i32)) -> usize {
        self.neighbors(p).count()
    }

    /// Pixels sorted in raster order (y, then x).
    pub fn sorted_pixels(&self) -> Vec<(i32, i32)> {
        let mut v: Vec<(i32, i32)> = self.pixels.iter().copied().collect();
        v.sort_unstable_by_key(|&(x, y)| (y, x));
        v
    }

    pub fn to_mask(&self) -> BinaryMask {
        let mut mask = BinaryMask::new(self.width, self.height);
        for &(x, y) in &self.pixels {
            mask.set(x as usize, y as usize, true);
        }
        mask
    }
}

/// Padded working grid so neighbor reads never need bounds checks.
struct Grid {
    w: usize,
    cells: Vec<u8>,
}

impl Grid {
    fn from_mask(mask: &BinaryMask) -> Self {
        let w = mask.width() + 2;
        let h = mask.height() + 2;
        let mut cells = vec![0u8; w * h];
        for (y, row) in mask.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    cells[(y + 1) * w + x + 1] = 1;
                }
            }
        }
        Self { w, cells }
    }

    /// P2..P9 clockwise from north.
    #[inline]
    fn ring(&self, i: usize) -> [u8; 8] {
        let w = self.w;
        let c = &self.cells;
        [
            c[i - w],
            c[i - w + 1],
            c[i + 1],
            c[i + w + 1],
            c[i + w],
            c[i + w - 1],
            c[i - 1],
            c[i - w - 1],
        ]
    }
}

fn zhang_suen_deletable(p: [u8; 8], first_pass: bool) -> bool {
    let [p2, p3, p4, p5, p6, p7, p8, p9] = p;
    let b: u8 = p.iter().sum();
    if !(2..=6).contains(&b) {
        return false;
    }
    let seq = [p2, p3, p4, p5, p6, p7, p8, p9, p2];
    let a = seq.windows(2).filter(|w| w[0] == 0 && w[1] == 1).count();
    if a != 1 {
        return false;
    }
    if first_pass {
        p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0
    } else {
        p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0
    }
}

/// Thin `mask` to a one-pixel-wide, 8-connected skeleton.
///
/// Zhang–Suen iterations run until stable, followed by one sweep removing
/// staircase corners: a pixel whose only neighbors are two orthogonal
/// 4-neighbors (plus optionally the diagonal between them) adds no
/// connectivity and would otherwise read as a branch.
pub fn thin(mask: &BinaryMask) -> Skeleton {
    let width = mask.width();
    let height = mask.height();
    let mut grid = Grid::from_mask(mask);
    let mut candidates: Vec<usize> = (0..grid.cells.len()).filter(|&i| grid.cells[i] != 0).collect();

    loop {
        let mut changed = false;
        for first_pass in [true, false] {
            let doomed: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| grid.cells[i] != 0 && zhang_suen_deletable(grid.ring(i), first_pass))
                .collect();
            changed |= !doomed.is_empty();
            for i in doomed {
                grid.cells[i] = 0;
            }
        }
        candidates.retain(|&i| grid.cells[i] != 0);
        if !changed {
            break;
        }
    }

    for &i in &candidates {
        let [n, ne, e, se, s, sw, w, nw] = grid.ring(i);
        let redundant = (n == 1 && e == 1 && s + sw + w + nw + se == 0)
            || (e == 1 && s == 1 && n + ne + w + nw + sw == 0)
            || (s == 1 && w == 1 && n + ne + e + se + nw == 0)
            || (w == 1 && n == 1 && e + se + s + sw + ne == 0);
        if redundant {
            grid.cells[i] = 0;
        }
    }

    let pixels = candidates
        .into_iter()
        .filter(|&i| grid.cells[i] != 0)
        .map(|i| ((i % grid.w) as i32 - 1, (i / grid.w) as i32 - 1))
        .collect();
    Skeleton::from_pixels(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(w: usize, h: usize, rect: (usize, usize, usize, usize)) -> BinaryMask {
        let mut m = BinaryMask::new(w, h);
        for y in rect.1..rect.3 {
            for x in rect.0..rect.2 {
                m.set(x, y, true);
            }
        }
        m
    }

    #[test]
    fn thick_bar_thins_to_a_single_row() {
        let skel = thin(&filled(60, 20, (5, 8, 55, 13)));
        assert!(!skel.is_empty());
        // Interior of a horizontal bar collapses onto one row.
        let interior: Vec<_> = skel
            .sorted_pixels()
            .into_iter()
            .filter(|p| p.0 > 12 && p.0 < 48)
            .collect();
        assert!(interior.iter().all(|p| p.1 == interior[0].1));
        for p in interior {
            assert_eq!(skel.degree(p), 2);
        }
    }

    #[test]
    fn skeleton_stays_connected() {
        // L-shaped trace.
        let mut m = filled(50, 50, (5, 5, 45, 10));
        for y in 5..45 {
            for x in 5..10 {
                m.set(x, y, true);
            }
        }
        let skel = thin(&m);
        let pixels = skel.sorted_pixels();
        let mut seen = HashSet::new();
        let mut stack = vec![pixels[0]];
        while let Some(p) = stack.pop() {
            if seen.insert(p) {
                stack.extend(skel.neighbors(p));
            }
        }
        assert_eq!(seen.len(), skel.len());
    }

    #[test]
    fn empty_mask_gives_empty_skeleton() {
        let skel = thin(&BinaryMask::new(10, 10));
        assert!(skel.is_empty());
        assert!(skel.to_mask().is_blank());
    }

    #[test]
    fn staircase_corner_is_removed() {
        let mut m = BinaryMask::new(5, 5);
        // Already thin: (1,1) (2,1) (2,2) (2,3) with a redundant corner at (2,1).
        for p in [(0, 1), (1, 1), (2, 1), (2, 2), (2, 3)] {
            m.set(p.0, p.1, true);
        }
        let skel = thin(&m);
        for p in skel.sorted_pixels() {
            assert!(skel.degree(p) <= 2, "pixel {p:?} has degree {}", skel.degree(p));
        }
    }
}
