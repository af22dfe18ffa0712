//! Crate-wide error type.
//!
//! Only decode failures, parameter misuse, cancellation and artifact I/O are
//! errors. Degenerate images and images without a grid or trace produce empty
//! results instead.
use std::path::PathBuf;

/// Errors surfaced by the detectors and their I/O helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source image could not be read or decoded.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A parameter was negative or not finite.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A cancellation request was observed between stages.
    #[error("operation cancelled")]
    Cancelled,
    /// Reading a config or writing an artifact or export failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Encoding a debug raster failed.
    #[error("failed to encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject negative or non-finite values; zero is accepted and means "disabled".
pub(crate) fn ensure_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_accepted_negative_rejected() {
        assert!(ensure_non_negative("snap_distance", 0.0).is_ok());
        assert!(ensure_non_negative("snap_distance", 4.5).is_ok());
        assert!(matches!(
            ensure_non_negative("snap_distance", -1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(ensure_non_negative("rdp_epsilon", f32::NAN).is_err());
    }
}
