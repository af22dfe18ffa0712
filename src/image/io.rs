//! I/O helpers for rasters, masks and JSON.
//!
//! - `load_raster`: read a PNG/JPEG into an owned RGB buffer.
//! - `decode_raster`: same, from bytes already in memory.
//! - `save_mask`, `save_rgb`, `save_rgba`: write debug rasters as PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BinaryMask, RasterImage};
use crate::error::{Error, Result};
use image::{RgbImage, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image from disk and convert it to RGB8.
pub fn load_raster(path: &Path) -> Result<RasterImage> {
    let img = image::open(path)
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    Ok(RasterImage::from_rgb_image(&img))
}

/// Decode an in-memory PNG/JPEG buffer into RGB8.
pub fn decode_raster(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| Error::Decode {
            path: PathBuf::from("<memory>"),
            source,
        })?
        .into_rgb8();
    Ok(RasterImage::from_rgb_image(&img))
}

/// Save a binary mask as an 8-bit PNG (set pixels white).
pub fn save_mask(mask: &BinaryMask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    mask.as_gray().save(path).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_bytes_are_a_decode_error() {
        let err = decode_raster(b"definitely not a png").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = load_raster(Path::new("/nonexistent/map.png")).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn png_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/map.png");
        let mut raster = RasterImage::new(5, 4);
        raster.set(3, 2, [250, 0, 0]);
        save_rgb(&raster.to_rgb_image(), &path).expect("save");
        let loaded = load_raster(&path).expect("load");
        assert_eq!(loaded, raster);
    }
}
