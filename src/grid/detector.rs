//! Grid detector: ACF pass with harmonic filtering, brute-force fallback.
use super::acf::{autocorrelation, combine_acf, filter_harmonics, find_peaks, strongest_peak, AcfPeak};
use super::brute::{brute_force_search, BruteForceHit};
use super::params::{GridDescriptor, GridMethod, GridParams};
use super::phase::best_offsets;
use crate::cancel::CancelToken;
use crate::diagnostics::{StageTimer, TimingBreakdown};
use crate::edges::{extract_edge_fields, EdgeFields};
use crate::error::Result;
use crate::image::RasterImage;
use log::debug;
use serde::Serialize;

/// What the autocorrelation stage saw.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AcfStage {
    /// All local maxima inside the search range.
    pub peaks: Vec<AcfPeak>,
    /// Peaks surviving the harmonic filter.
    pub kept: Vec<AcfPeak>,
    pub best: Option<AcfPeak>,
    pub accepted: bool,
}

/// Descriptor plus the intermediate evidence behind it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GridReport {
    pub descriptor: GridDescriptor,
    pub acf: AcfStage,
    pub brute_force: Option<BruteForceHit>,
    pub brute_force_ran: bool,
    pub timing: TimingBreakdown,
}

/// Stateless grid pitch detector.
#[derive(Clone, Debug, Default)]
pub struct GridDetector {
    params: GridParams,
}

impl GridDetector {
    /// Validate `params` and build a detector.
    pub fn new(params: GridParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// Detect the grid of a raster. Never fails; no grid yields `grid_size = None`.
    pub fn detect(&self, img: &RasterImage) -> GridDescriptor {
        self.detect_with_report(img).descriptor
    }

    /// Detect from precomputed edge fields.
    pub fn detect_fields(&self, fields: &EdgeFields) -> GridDescriptor {
        self.run_fields(fields, None, StageTimer::start())
            .map(|r| r.descriptor)
            .unwrap_or_default()
    }

    pub fn detect_with_report(&self, img: &RasterImage) -> GridReport {
        self.run(img, None).unwrap_or_default()
    }

    /// Like [`detect_with_report`](Self::detect_with_report) but checks `cancel`
    /// between stages.
    pub fn detect_cancellable(&self, img: &RasterImage, cancel: &CancelToken) -> Result<GridReport> {
        self.run(img, Some(cancel))
    }

    fn run(&self, img: &RasterImage, cancel: Option<&CancelToken>) -> Result<GridReport> {
        let mut timer = StageTimer::start();
        let fields = extract_edge_fields(img);
        timer.lap("edges");
        self.run_fields(&fields, cancel, timer)
    }

    fn run_fields(
        &self,
        fields: &EdgeFields,
        cancel: Option<&CancelToken>,
        mut timer: StageTimer,
    ) -> Result<GridReport> {
        check(cancel)?;
        let rows = fields.row_profile();
        let cols = fields.column_profile();
        let min_size = self.params.min_size as usize;
        let max_size = self.params.max_size as usize;

        let acf = self.acf_stage(&rows, &cols);
        timer.lap("acf");

        let mut report = GridReport {
            acf,
            ..Default::default()
        };

        if let (true, Some(best)) = (report.acf.accepted, report.acf.best) {
            let (x_off, y_off) = best_offsets(&rows, &cols, best.lag);
            timer.lap("offsets");
            debug!(
                "GridDetector ACF accepted size={} confidence={:.3} offset=({x_off}, {y_off})",
                best.lag, best.strength
            );
            report.descriptor = GridDescriptor {
                grid_size: Some(best.lag as u32),
                x_offset: x_off as u32,
                y_offset: y_off as u32,
                confidence: best.strength.clamp(0.0, 1.0),
                method: GridMethod::Acf,
            };
            report.timing = timer.finish();
            return Ok(report);
        }

        check(cancel)?;
        debug!(
            "GridDetector ACF rejected (best={:?}, threshold={:.2}); running brute force over [{min_size}, {max_size}]",
            report.acf.best, self.params.acf_threshold
        );
        report.brute_force_ran = true;
        report.brute_force = brute_force_search(fields, min_size, max_size);
        timer.lap("brute_force");

        report.descriptor = match report.brute_force {
            Some(hit) => GridDescriptor {
                grid_size: Some(hit.size as u32),
                x_offset: hit.x_offset as u32,
                y_offset: hit.y_offset as u32,
                confidence: hit.score,
                method: GridMethod::BruteForce,
            },
            None => {
                debug!("GridDetector found no periodicity");
                GridDescriptor::default()
            }
        };
        report.timing = timer.finish();
        Ok(report)
    }

    fn acf_stage(&self, rows: &[f32], cols: &[f32]) -> AcfStage {
        let (Some(h_acf), Some(v_acf)) = (autocorrelation(rows), autocorrelation(cols)) else {
            debug!("GridDetector ACF skipped: flat or degenerate edge profile");
            return AcfStage::default();
        };
        let combined = combine_acf(&h_acf, &v_acf);
        let peaks = find_peaks(
            &combined,
            self.params.min_size as usize,
            self.params.max_size as usize,
        );
        let kept = filter_harmonics(
            &peaks,
            self.params.harmonic_ratio,
            self.params.harmonic_tolerance as usize,
        );
        let best = strongest_peak(&kept);
        let accepted = best.map_or(false, |b| b.strength >= self.params.acf_threshold);
        debug!(
            "GridDetector ACF peaks={} kept={} best={:?}",
            peaks.len(),
            kept.len(),
            best
        );
        AcfStage {
            peaks,
            kept,
            best,
            accepted,
        }
    }
}

fn check(cancel: Option<&CancelToken>) -> Result<()> {
    cancel.map_or(Ok(()), CancelToken::check)
}
