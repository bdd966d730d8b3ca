//! RON file helpers shared by every data registry.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Root directory of all data files.
pub const DATA_DIR: &str = "assets/data";

/// Parse a RON document, attributing errors to `path`.
pub fn parse_ron<T: DeserializeOwned>(contents: &str, path: &Path) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Read and parse a single RON file.
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_ron(&contents, path)
}

/// Load every `.ron` file in `dir`, keyed by file stem.
///
/// Files that fail to parse are logged and skipped; only a missing or
/// unreadable directory is an error.
pub fn load_ron_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<(String, T)>, DataLoadError> {
    if !dir.exists() {
        return Err(DataLoadError::FileNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut loaded = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match load_ron_file::<T>(&path) {
            Ok(value) => loaded.push((stem.to_string(), value)),
            Err(e) => error!("{}", e),
        }
    }

    // read_dir order is platform dependent
    loaded.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(loaded)
}
