//! Autocorrelation stage: periodicity of the 1D edge profiles.
//!
//! Each profile is mean-removed, zero-padded to a power of two at least twice
//! its length (so the circular correlation equals the linear one), and
//! correlated with itself through `|X|^2`. Lags are normalized by the zero-lag
//! energy so `acf[0] == 1`.
use super::fft::{fft_in_place, Direction};
use nalgebra::Complex;
use serde::Serialize;

/// Energies at or below this are treated as a flat signal.
const MIN_ENERGY: f64 = 1e-9;

/// A local maximum of the combined autocorrelation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AcfPeak {
    pub lag: usize,
    pub strength: f32,
}

/// Normalized autocorrelation of `signal`, or `None` for signals with fewer
/// than two samples or no variation.
pub fn autocorrelation(signal: &[f32]) -> Option<Vec<f32>> {
    let n = signal.len();
    if n < 2 {
        return None;
    }
    let mean = signal.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let energy: f64 = signal.iter().map(|&v| (v as f64 - mean).powi(2)).sum();
    if energy <= MIN_ENERGY {
        return None;
    }

    let padded = (2 * n).next_power_of_two();
    let mut buf = vec![Complex::new(0.0, 0.0); padded];
    for (b, &v) in buf.iter_mut().zip(signal) {
        *b = Complex::new(v as f64 - mean, 0.0);
    }
    fft_in_place(&mut buf, Direction::Forward);
    for c in buf.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    fft_in_place(&mut buf, Direction::Inverse);

    let r0 = buf[0].re;
    if r0 <= MIN_ENERGY {
        return None;
    }
    let mut acf: Vec<f32> = buf[..n].iter().map(|c| (c.re / r0) as f32).collect();
    acf[0] = 1.0;
    Some(acf)
}

/// Geometric mean of the two absolute autocorrelations over their shared length.
pub fn combine_acf(h_acf: &[f32], v_acf: &[f32]) -> Vec<f32> {
    h_acf
        .iter()
        .zip(v_acf)
        .map(|(&a, &b)| (a.abs() * b.abs()).sqrt())
        .collect()
}

/// Strict local maxima of `combined` with lag in `[min_lag, max_lag]`.
pub fn find_peaks(combined: &[f32], min_lag: usize, max_lag: usize) -> Vec<AcfPeak> {
    if combined.len() < 3 {
        return Vec::new();
    }
    let lo = min_lag.max(1);
    let hi = max_lag.min(combined.len() - 2);
    (lo..=hi)
        .filter(|&k| combined[k] > combined[k - 1] && combined[k] > combined[k + 1])
        .map(|lag| AcfPeak {
            lag,
            strength: combined[lag],
        })
        .collect()
}

/// Drop peaks that look like the second harmonic of another peak.
///
/// A peak at `L` is discarded when some other peak sits within `tolerance`
/// of `L / 2` with at least `ratio` times the strength of `L`. When every
/// peak would be discarded the input set is returned unchanged.
pub fn filter_harmonics(peaks: &[AcfPeak], ratio: f32, tolerance: usize) -> Vec<AcfPeak> {
    let kept: Vec<AcfPeak> = peaks
        .iter()
        .copied()
        .filter(|candidate| {
            let half = candidate.lag as f32 / 2.0;
            !peaks.iter().any(|other| {
                other.lag != candidate.lag
                    && (other.lag as f32 - half).abs() <= tolerance as f32
                    && other.strength >= ratio * candidate.strength
            })
        })
        .collect();
    if kept.is_empty() {
        peaks.to_vec()
    } else {
        kept
    }
}

/// Strongest peak; ties resolve to the shorter lag.
pub fn strongest_peak(peaks: &[AcfPeak]) -> Option<AcfPeak> {
    peaks.iter().copied().fold(None, |best, p| match best {
        Some(b) if b.strength >= p.strength => Some(b),
        _ => Some(p),
    })
}
