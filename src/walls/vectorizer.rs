//! Wall vectorizer: trace mask → skeleton → polylines → cleaned polylines.
use super::cleanup::{finalize, prune_short, remove_parallel_duplicates};
use super::connect::connect_polylines;
use super::export::WallExport;
use super::morph::{close, dilate, open};
use super::params::WallParams;
use super::polyline::Polyline;
use super::render::save_debug_artifacts;
use super::segment::segment_trace;
use super::simplify::{remove_collinear, simplify_rdp};
use super::skeleton::{thin, Skeleton};
use super::trace::trace_polylines;
use crate::cancel::CancelToken;
use crate::diagnostics::{StageTimer, TimingBreakdown};
use crate::error::Result;
use crate::image::io::load_raster;
use crate::image::{BinaryMask, ImageView, RasterImage};
use log::debug;
use serde::Serialize;
use std::path::Path;

/// Sizes of the intermediate products, one field per stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub mask_pixels: usize,
    pub skeleton_pixels: usize,
    pub traced: usize,
    pub simplified_vertices: usize,
    pub connected: usize,
    pub after_prune: usize,
    pub collinear_removed: usize,
    pub after_dedup: usize,
    pub output: usize,
}

/// Polylines plus the intermediate evidence behind them.
#[derive(Clone, Debug, Serialize)]
pub struct WallReport {
    pub width: u32,
    pub height: u32,
    pub polylines: Vec<Polyline>,
    #[serde(skip)]
    pub mask: BinaryMask,
    #[serde(skip)]
    pub skeleton: Skeleton,
    pub counts: StageCounts,
    pub timing: TimingBreakdown,
}

impl WallReport {
    pub fn export(&self) -> WallExport {
        WallExport::from_polylines(self.width, self.height, &self.polylines)
    }
}

/// Stateless wall vectorizer; one instance may serve any number of images.
#[derive(Clone, Debug, Default)]
pub struct WallVectorizer {
    params: WallParams,
}

impl WallVectorizer {
    /// Validate `params` and build a vectorizer.
    pub fn new(params: WallParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &WallParams {
        &self.params
    }

    /// Final polylines. An image without trace pixels yields an empty list.
    pub fn vectorize(&self, img: &RasterImage) -> Result<Vec<Polyline>> {
        Ok(self.run(img, None)?.polylines)
    }

    pub fn vectorize_with_report(&self, img: &RasterImage) -> Result<WallReport> {
        self.run(img, None)
    }

    /// Like [`vectorize_with_report`](Self::vectorize_with_report) but checks
    /// `cancel` between stages.
    pub fn vectorize_cancellable(&self, img: &RasterImage, cancel: &CancelToken) -> Result<WallReport> {
        self.run(img, Some(cancel))
    }

    /// Load `path`, vectorize it and, when `debug_dir` is given, write the
    /// debug renders there.
    pub fn vectorize_file(&self, path: &Path, debug_dir: Option<&Path>) -> Result<WallReport> {
        let img = load_raster(path)?;
        let report = self.run(&img, None)?;
        if let Some(dir) = debug_dir {
            save_debug_artifacts(dir, &img, &report.mask, &report.skeleton, &report.polylines)?;
        }
        Ok(report)
    }

    fn run(&self, img: &RasterImage, cancel: Option<&CancelToken>) -> Result<WallReport> {
        let p = &self.params;
        let mut timer = StageTimer::start();
        let mut counts = StageCounts::default();

        let mask = segment_trace(img, &p.trace_color);
        let mask = open(&close(&mask, p.close_radius), p.open_radius);
        counts.mask_pixels = mask.count();
        timer.lap("segment");
        debug!("WallVectorizer mask: {} trace pixels", counts.mask_pixels);
        check(cancel)?;

        let skeleton = thin(&dilate(&mask, p.skeleton_dilate_radius));
        counts.skeleton_pixels = skeleton.len();
        timer.lap("skeleton");
        check(cancel)?;

        let raw = trace_polylines(&skeleton);
        counts.traced = raw.len();
        timer.lap("trace");
        debug!(
            "WallVectorizer traced {} polylines from {} skeleton pixels",
            counts.traced, counts.skeleton_pixels
        );
        check(cancel)?;

        let simplified: Vec<Polyline> = raw.iter().map(|l| simplify_rdp(l, p.rdp_epsilon)).collect();
        counts.simplified_vertices = simplified.iter().map(Vec::len).sum();
        timer.lap("simplify");
        check(cancel)?;

        let connected = connect_polylines(simplified, p.snap_distance);
        counts.connected = connected.len();
        timer.lap("connect");
        check(cancel)?;

        let mut lines = prune_short(connected, p.min_length);
        counts.after_prune = lines.len();
        for line in &mut lines {
            counts.collinear_removed += remove_collinear(line, p.collinear_tolerance);
        }
        let lines = remove_parallel_duplicates(lines, p.parallel_distance);
        counts.after_dedup = lines.len();
        let polylines = finalize(lines, p.min_length);
        counts.output = polylines.len();
        timer.lap("cleanup");
        debug!("WallVectorizer stage counts: {counts:?}");

        Ok(WallReport {
            width: img.width() as u32,
            height: img.height() as u32,
            polylines,
            mask,
            skeleton,
            counts,
            timing: timer.finish(),
        })
    }
}

fn check(cancel: Option<&CancelToken>) -> Result<()> {
    cancel.map_or(Ok(()), CancelToken::check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::walls::polyline::arc_length;

    const RED: [u8; 3] = [220, 20, 20];

    #[test]
    fn thick_red_bar_becomes_one_polyline() {
        let mut img = RasterImage::filled(200, 80, [240, 240, 230]);
        img.fill_rect(20, 38, 180, 42, RED);
        let lines = WallVectorizer::default().vectorize(&img).unwrap();
        assert_eq!(lines.len(), 1);
        let len = arc_length(&lines[0]);
        assert!((len - 160.0).abs() < 12.0, "arc length {len}");
    }

    #[test]
    fn no_trace_gives_empty_result() {
        let img = RasterImage::new(64, 64);
        let report = WallVectorizer::default().vectorize_with_report(&img).unwrap();
        assert!(report.polylines.is_empty());
        assert_eq!(report.counts, StageCounts::default());
        assert_eq!(report.timing.stages.len(), 6);
    }

    #[test]
    fn specks_shorter_than_min_length_vanish() {
        let mut img = RasterImage::new(120, 120);
        img.fill_rect(10, 10, 110, 14, RED);
        img.fill_rect(40, 60, 46, 64, RED);
        let params = WallParams {
            min_length: 20.0,
            ..Default::default()
        };
        let lines = WallVectorizer::new(params).unwrap().vectorize(&img).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].iter().all(|p| p.y < 20.0));
    }

    #[test]
    fn cancellation_is_observed() {
        let img = RasterImage::new(32, 32);
        let token = CancelToken::new();
        token.cancel();
        let res = WallVectorizer::default().vectorize_cancellable(&img, &token);
        assert!(matches!(res, Err(Error::Cancelled)));
    }

    #[test]
    fn negative_parameters_are_rejected() {
        let params = WallParams {
            rdp_epsilon: -1.0,
            ..Default::default()
        };
        assert!(matches!(WallVectorizer::new(params), Err(Error::InvalidParameter(_))));
    }
}
