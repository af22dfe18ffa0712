//! Grid pitch and phase detection from edge profiles.
//!
//! Overview
//! - Reduce the two edge fields to 1D row/column profiles.
//! - Stage A: autocorrelate each profile (zero-padded FFT), combine by
//!   geometric mean, pick local maxima in the search range and discard those
//!   that look like harmonics of a shorter period. The strongest survivor is
//!   the pitch; its combined ACF value is the confidence.
//! - Offsets are found by folding the profiles modulo the pitch.
//! - Stage B: if Stage A found nothing or its confidence is below the
//!   threshold, score every `(size, y_off, x_off)` exhaustively by an SNR
//!   measure weighted by the number of grid lines observed.
//!
//! Modules
//! - [`acf`] – autocorrelation, peak picking, harmonic filter.
//! - [`brute`] – exhaustive fallback search.
//! - [`phase`] – phase binning and offset selection.
//! - `fft` – radix-2 transform used by the ACF.
//! - [`params`] – knobs and the output descriptor.

pub mod acf;
pub mod brute;
mod detector;
mod fallback;
mod fft;
pub mod params;
pub mod phase;

pub use acf::{autocorrelation, combine_acf, filter_harmonics, find_peaks, AcfPeak};
pub use brute::{brute_force_search, BruteForceHit};
pub use detector::{AcfStage, GridDetector, GridReport};
pub use fallback::fallback_grid_size;
pub use params::{GridDescriptor, GridMethod, GridParams};
pub use phase::best_offsets;
