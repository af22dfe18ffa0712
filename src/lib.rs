#![doc = include_str!("../README.md")]

pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod grid;
pub mod image;
pub mod walls;

// --- High-level re-exports -------------------------------------------------

pub use crate::cancel::CancelToken;
pub use crate::error::{Error, Result};
pub use crate::grid::{GridDescriptor, GridDetector, GridMethod, GridParams};
pub use crate::walls::{Polyline, WallExport, WallParams, WallVectorizer};

// --- Prelude ---------------------------------------------------------------

/// Everything needed for the common load → detect → vectorize flow.
pub mod prelude {
    pub use crate::image::io::load_raster;
    pub use crate::image::RasterImage;
    pub use crate::{
        GridDescriptor, GridDetector, GridMethod, GridParams, Polyline, WallParams,
        WallVectorizer,
    };
}
