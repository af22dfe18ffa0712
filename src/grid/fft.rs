//! In-place radix-2 FFT over `nalgebra`'s complex type.
//!
//! Only power-of-two lengths are supported; callers zero-pad.
use nalgebra::Complex;
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

/// Iterative Cooley–Tukey transform. The inverse is scaled by `1/n`.
pub fn fft_in_place(buf: &mut [Complex<f64>], dir: Direction) {
    let n = buf.len();
    debug_assert!(n.is_power_of_two(), "fft length must be a power of two");
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            buf.swap(i, j);
        }
    }

    let sign = match dir {
        Direction::Forward => -1.0,
        Direction::Inverse => 1.0,
    };
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = sign * 2.0 * PI / len as f64;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let w = Complex::from_polar(1.0, step * k as f64);
                let u = buf[start + k];
                let v = buf[start + k + half] * w;
                buf[start + k] = u + v;
                buf[start + k + half] = u - v;
            }
        }
        len <<= 1;
    }

    if dir == Direction::Inverse {
        let inv = 1.0 / n as f64;
        for x in buf.iter_mut() {
            *x *= inv;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dft(x: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let n = x.len();
        (0..n)
            .map(|k| {
                x.iter().enumerate().fold(Complex::new(0.0, 0.0), |acc, (t, &v)| {
                    acc + v * Complex::from_polar(1.0, -2.0 * PI * (k * t) as f64 / n as f64)
                })
            })
            .collect()
    }

    #[test]
    fn matches_naive_dft() {
        let input: Vec<Complex<f64>> = (0..16)
            .map(|i| Complex::new((i as f64 * 0.7).sin() + 0.1 * i as f64, 0.0))
            .collect();
        let expected = naive_dft(&input);
        let mut buf = input.clone();
        fft_in_place(&mut buf, Direction::Forward);
        for (a, b) in buf.iter().zip(&expected) {
            assert!((a - b).norm() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn inverse_undoes_forward() {
        let input: Vec<Complex<f64>> = (0..32).map(|i| Complex::new(i as f64, -(i as f64))).collect();
        let mut buf = input.clone();
        fft_in_place(&mut buf, Direction::Forward);
        fft_in_place(&mut buf, Direction::Inverse);
        for (a, b) in buf.iter().zip(&input) {
            assert!((a - b).norm() < 1e-9);
        }
    }
}
