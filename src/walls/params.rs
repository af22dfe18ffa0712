//! Parameters of the wall vectorizer.
//!
//! Every distance is in source-image pixels. A value of zero disables the
//! corresponding stage; negative or non-finite values are rejected by
//! [`WallParams::validate`].
use crate::error::{ensure_non_negative, Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive hue interval in degrees. `min_deg > max_deg` wraps through 0°.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HueBand {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl HueBand {
    pub const fn new(min_deg: f32, max_deg: f32) -> Self {
        Self { min_deg, max_deg }
    }

    #[inline]
    pub fn contains(&self, hue_deg: f32) -> bool {
        if self.min_deg <= self.max_deg {
            hue_deg >= self.min_deg && hue_deg <= self.max_deg
        } else {
            hue_deg >= self.min_deg || hue_deg <= self.max_deg
        }
    }
}

/// Color of the traced overlay in HSV space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceColor {
    pub bands: Vec<HueBand>,
    /// Saturation floor in `[0, 1]`.
    pub min_saturation: f32,
    /// Value (brightness) floor in `[0, 1]`.
    pub min_value: f32,
}

impl TraceColor {
    /// Red sits on the hue discontinuity, so it needs two bands.
    pub fn red() -> Self {
        Self {
            bands: vec![HueBand::new(0.0, 20.0), HueBand::new(340.0, 360.0)],
            min_saturation: 0.27,
            min_value: 0.2,
        }
    }
}

impl Default for TraceColor {
    fn default() -> Self {
        Self::red()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallParams {
    pub trace_color: TraceColor,
    /// Closing radius (bridges small gaps in the trace).
    pub close_radius: u32,
    /// Opening radius (removes speckle).
    pub open_radius: u32,
    /// Dilation applied right before thinning to seal micro-gaps.
    pub skeleton_dilate_radius: u32,
    /// Ramer–Douglas–Peucker tolerance.
    pub rdp_epsilon: f32,
    /// Endpoint snapping distance for gap connection.
    pub snap_distance: f32,
    /// Polylines shorter than this (arc length) are discarded.
    pub min_length: f32,
    /// Interior vertices closer than this to the line through their
    /// neighbors are dropped.
    pub collinear_tolerance: f32,
    /// Mean separation below which a shorter polyline counts as a duplicate
    /// of a longer one.
    pub parallel_distance: f32,
}

impl Default for WallParams {
    fn default() -> Self {
        Self {
            trace_color: TraceColor::red(),
            close_radius: 2,
            open_radius: 1,
            skeleton_dilate_radius: 1,
            rdp_epsilon: 2.0,
            snap_distance: 6.0,
            min_length: 10.0,
            collinear_tolerance: 1.0,
            parallel_distance: 0.0,
        }
    }
}

impl WallParams {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("rdp_epsilon", self.rdp_epsilon)?;
        ensure_non_negative("snap_distance", self.snap_distance)?;
        ensure_non_negative("min_length", self.min_length)?;
        ensure_non_negative("collinear_tolerance", self.collinear_tolerance)?;
        ensure_non_negative("parallel_distance", self.parallel_distance)?;
        ensure_non_negative("trace_color.min_saturation", self.trace_color.min_saturation)?;
        ensure_non_negative("trace_color.min_value", self.trace_color.min_value)?;
        for band in &self.trace_color.bands {
            let in_range = |v: f32| v.is_finite() && (0.0..=360.0).contains(&v);
            if !in_range(band.min_deg) || !in_range(band.max_deg) {
                return Err(Error::InvalidParameter(format!(
                    "hue band {:?} must lie within [0, 360]",
                    band
                )));
            }
        }
        Ok(())
    }
}
