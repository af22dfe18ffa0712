//! Structured wall export: `{width, height, polylines: [[[x, y], ...], ...]}`.
use super::polyline::Polyline;
use crate::error::{Error, Result};
use crate::image::io::write_json_file;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallExport {
    pub width: u32,
    pub height: u32,
    pub polylines: Vec<Vec<[f32; 2]>>,
}

impl WallExport {
    pub fn from_polylines(width: u32, height: u32, polylines: &[Polyline]) -> Self {
        Self {
            width,
            height,
            polylines: polylines
                .iter()
                .map(|l| l.iter().map(|p| [p.x, p.y]).collect())
                .collect(),
        }
    }

    pub fn to_polylines(&self) -> Vec<Polyline> {
        self.polylines
            .iter()
            .map(|l| l.iter().map(|&[x, y]| Point2::new(x, y)).collect())
            .collect()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_json_file(path, self)
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_is_nested_arrays() {
        let lines = vec![vec![Point2::new(1.0, 2.0), Point2::new(3.5, 4.0)]];
        let export = WallExport::from_polylines(64, 32, &lines);
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"width": 64, "height": 32, "polylines": [[[1.0, 2.0], [3.5, 4.0]]]})
        );
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("walls.json");
        let lines = vec![vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Point2::new(10.0, 7.5)]];
        WallExport::from_polylines(20, 20, &lines).write_json(&path).unwrap();
        let back = WallExport::read_json(&path).unwrap();
        assert_eq!(back.to_polylines(), lines);
    }
}
