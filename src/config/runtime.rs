use crate::error::{Error, Result};
use crate::grid::GridParams;
use crate::walls::WallParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Grid descriptor JSON.
    pub grid_json: Option<PathBuf>,
    /// Wall export JSON.
    pub json_out: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
}

/// One full run: which image, how to detect, where to write.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub grid: GridParams,
    #[serde(default)]
    pub walls: WallParams,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Read and parse a runtime config. Relative paths inside the file are
/// resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: RuntimeConfig = serde_json::from_str(&contents)?;
    config.grid.validate()?;
    config.walls.validate()?;

    if let Some(base) = path.parent() {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut config.input);
        let out = &mut config.output;
        for p in [&mut out.grid_json, &mut out.json_out, &mut out.debug_dir]
            .into_iter()
            .flatten()
        {
            resolve(p);
        }
    }
    Ok(config)
}
