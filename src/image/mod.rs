//! Owned raster buffers used across the crate.
//!
//! - [`RasterImage`]: RGB8 source image, immutable once loaded.
//! - [`ImageF32`]: single-channel float buffer (edge fields).
//! - [`BinaryMask`]: 0/255 luma buffer marking traced pixels.
//!
//! All three expose row access through [`ImageView`].
pub mod f32;
pub mod io;
pub mod mask;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::mask::BinaryMask;
pub use self::rgb::RasterImage;
pub use self::traits::{ImageView, ImageViewMut, Rows};
