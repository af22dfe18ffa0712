//! Brute-force pitch search used when the autocorrelation is not convincing.
//!
//! For every pitch `s` and phase pair `(y_off, x_off)` the hypothesis samples
//! the `h_edges` rows at `y_off + k·s` and the `v_edges` columns at
//! `x_off + k·s`. Mean and variance are taken over all sampled pixels:
//!
//! `score = mean / sqrt(variance) * ln(n_h + n_v + 1)`
//!
//! where `n_h`, `n_v` count the sampled lines; the log factor rewards
//! hypotheses observed over more grid lines. Phases with zero variance have
//! no defined SNR and are skipped. Pitches are scored in parallel; the
//! reduction is sequential so ties resolve the same way on every run.
use crate::edges::EdgeFields;
use crate::image::{ImageF32, ImageView};
use rayon::prelude::*;
use serde::Serialize;

const MIN_VARIANCE: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BruteForceHit {
    pub size: usize,
    pub x_offset: usize,
    pub y_offset: usize,
    pub score: f32,
}

/// First and second moments of a set of edge pixels.
#[derive(Clone, Copy, Debug, Default)]
struct Moments {
    sum: f64,
    sum_sq: f64,
    pixels: usize,
    lines: usize,
}

impl Moments {
    fn of_line<'a>(values: impl Iterator<Item = &'a f32>) -> Self {
        values.fold(
            Moments {
                lines: 1,
                ..Default::default()
            },
            |mut m, &v| {
                let v = v as f64;
                m.sum += v;
                m.sum_sq += v * v;
                m.pixels += 1;
                m
            },
        )
    }

    fn add(&mut self, other: &Moments) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.pixels += other.pixels;
        self.lines += other.lines;
    }
}

fn row_moments(field: &ImageF32) -> Vec<Moments> {
    field.rows().map(|r| Moments::of_line(r.iter())).collect()
}

fn column_moments(field: &ImageF32) -> Vec<Moments> {
    (0..field.width())
        .map(|x| Moments::of_line(field.rows().map(|r| &r[x])))
        .collect()
}

/// Accumulate per-line moments into phase bins. Line `i` of an edge field
/// sits at image coordinate `i + 1`, so bins are keyed by `(i + 1) % size`.
fn fold_phases(lines: &[Moments], size: usize) -> Vec<Moments> {
    let mut bins = vec![Moments::default(); size];
    for (i, m) in lines.iter().enumerate() {
        bins[(i + 1) % size].add(m);
    }
    bins
}

/// SNR score of one `(y_off, x_off)` hypothesis; `None` when it samples
/// nothing or its samples do not vary.
fn phase_score(rows: &Moments, cols: &Moments) -> Option<f32> {
    let mut all = *rows;
    all.add(cols);
    if all.pixels == 0 {
        return None;
    }
    let n = all.pixels as f64;
    let mean = all.sum / n;
    let variance = (all.sum_sq / n - mean * mean).max(0.0);
    if variance <= MIN_VARIANCE {
        return None;
    }
    Some((mean / variance.sqrt() * ((all.lines + 1) as f64).ln()) as f32)
}

fn best_for_size(rows: &[Moments], cols: &[Moments], size: usize) -> Option<BruteForceHit> {
    let row_bins = fold_phases(rows, size);
    let col_bins = fold_phases(cols, size);
    let mut best: Option<BruteForceHit> = None;
    for (y_off, rb) in row_bins.iter().enumerate() {
        for (x_off, cb) in col_bins.iter().enumerate() {
            let Some(score) = phase_score(rb, cb) else {
                continue;
            };
            if best.map_or(true, |b| score > b.score) {
                best = Some(BruteForceHit {
                    size,
                    x_offset: x_off,
                    y_offset: y_off,
                    score,
                });
            }
        }
    }
    best
}

/// Exhaustive search over pitches in `[min_size, max_size]`.
///
/// Pitches not shorter than both edge fields are skipped since no period can
/// be observed. Returns `None` when no phase of any pitch has a defined SNR.
pub fn brute_force_search(fields: &EdgeFields, min_size: usize, max_size: usize) -> Option<BruteForceHit> {
    let rows = row_moments(&fields.h_edges);
    let cols = column_moments(&fields.v_edges);
    let limit = rows.len().min(cols.len());
    let hi = max_size.min(limit.saturating_sub(1));
    let lo = min_size.max(1);
    if lo > hi {
        return None;
    }

    let per_size: Vec<Option<BruteForceHit>> = (lo..=hi)
        .into_par_iter()
        .map(|s| best_for_size(&rows, &cols, s))
        .collect();

    per_size
        .into_iter()
        .flatten()
        .fold(None, |best: Option<BruteForceHit>, hit| match best {
            Some(b) if b.score >= hit.score => Some(b),
            _ => Some(hit),
        })
}
