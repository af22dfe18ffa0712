//! Phase binning of 1D edge profiles for a fixed grid pitch.
//!
//! Profile index `i` corresponds to image coordinate `i + 1` (the central
//! difference is centered one pixel in), so bins are keyed by
//! `(i + 1) % size` and offsets come out in image coordinates.

/// Sum and sample count per phase bin.
pub(crate) fn phase_sums(profile: &[f32], size: usize) -> (Vec<f32>, Vec<usize>) {
    let mut sums = vec![0.0f32; size];
    let mut counts = vec![0usize; size];
    for (i, &v) in profile.iter().enumerate() {
        let bin = (i + 1) % size;
        sums[bin] += v;
        counts[bin] += 1;
    }
    (sums, counts)
}

/// Mean edge strength per phase bin; empty bins read as zero.
pub fn phase_means(profile: &[f32], size: usize) -> Vec<f32> {
    if size == 0 {
        return Vec::new();
    }
    let (sums, counts) = phase_sums(profile, size);
    sums.iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f32 } else { 0.0 })
        .collect()
}

fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0usize, f32::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv {
                (i, v)
            } else {
                (bi, bv)
            }
        })
        .0
}

/// Best `(x_offset, y_offset)` for a grid of pitch `size`.
///
/// The joint score `mean_h[y] + mean_v[x]` is separable, so maximizing it
/// reduces to an independent argmax per axis.
pub fn best_offsets(row_profile: &[f32], column_profile: &[f32], size: usize) -> (usize, usize) {
    if size == 0 {
        return (0, 0);
    }
    let y_off = argmax(&phase_means(row_profile, size));
    let x_off = argmax(&phase_means(column_profile, size));
    (x_off, y_off)
}
