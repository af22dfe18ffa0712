//! Parameters and result types of the grid detector.
use crate::error::{ensure_non_negative, Error, Result};
use serde::{Deserialize, Serialize};

/// Search range and acceptance knobs for grid detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Smallest pitch considered, in pixels (>= 2).
    pub min_size: u32,
    /// Largest pitch considered, in pixels.
    pub max_size: u32,
    /// ACF confidence below which the brute-force search runs.
    pub acf_threshold: f32,
    /// A peak at `L` is a harmonic when the peak near `L/2` has at least this
    /// fraction of its strength.
    pub harmonic_ratio: f32,
    /// Lag tolerance (pixels) when looking for the `L/2` peak.
    pub harmonic_tolerance: u32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            min_size: 20,
            max_size: 200,
            acf_threshold: 0.3,
            harmonic_ratio: 0.7,
            harmonic_tolerance: 2,
        }
    }
}

impl GridParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_size < 2 {
            return Err(Error::InvalidParameter(format!(
                "min_size must be >= 2, got {}",
                self.min_size
            )));
        }
        if self.min_size > self.max_size {
            return Err(Error::InvalidParameter(format!(
                "min_size ({}) exceeds max_size ({})",
                self.min_size, self.max_size
            )));
        }
        ensure_non_negative("acf_threshold", self.acf_threshold)?;
        ensure_non_negative("harmonic_ratio", self.harmonic_ratio)?;
        Ok(())
    }
}

/// Which stage produced the pitch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMethod {
    Acf,
    #[default]
    BruteForce,
}

/// Grid pitch and phase in image pixels.
///
/// `grid_size == None` means no periodicity was found; callers apply their
/// own fallback (see [`fallback_grid_size`](super::fallback_grid_size)).
/// `confidence` is in `[0, 1]` for [`GridMethod::Acf`] and an unbounded SNR
/// score for [`GridMethod::BruteForce`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    pub grid_size: Option<u32>,
    pub x_offset: u32,
    pub y_offset: u32,
    pub confidence: f32,
    pub method: GridMethod,
}

impl GridDescriptor {
    pub fn found(&self) -> bool {
        self.grid_size.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_json_shape() {
        let d = GridDescriptor {
            grid_size: Some(50),
            x_offset: 3,
            y_offset: 7,
            confidence: 0.5,
            method: GridMethod::Acf,
        };
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["method"], "acf");
        assert_eq!(v["grid_size"], 50);
        let none = serde_json::to_value(GridDescriptor::default()).unwrap();
        assert!(none["grid_size"].is_null());
        assert_eq!(none["method"], "bruteforce");
    }

    #[test]
    fn params_reject_inverted_range_and_negative_threshold() {
        assert!(GridParams::default().validate().is_ok());
        let inverted = GridParams {
            min_size: 90,
            max_size: 40,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        let negative = GridParams {
            acf_threshold: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let p: GridParams = serde_json::from_str(r#"{"max_size": 120}"#).unwrap();
        assert_eq!(p.max_size, 120);
        assert_eq!(p.min_size, 20);
    }
}
