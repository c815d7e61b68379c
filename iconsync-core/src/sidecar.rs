//! Release sidecar: the fetched release list persisted as indented JSON.
//!
//! Writes use the `.tmp` + rename pattern so a crash never leaves a
//! truncated sidecar behind.

use std::path::{Path, PathBuf};

use crate::error::SidecarError;
use crate::types::Release;

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SidecarError {
    SidecarError::Io {
        path: path.into(),
        source,
    }
}

/// Save `releases` (newest-first) as a 2-space indented JSON array.
pub fn save_releases(path: &Path, releases: &[Release]) -> Result<(), SidecarError> {
    let mut json = serde_json::to_string_pretty(releases).map_err(|e| SidecarError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    json.push('\n');

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    tracing::debug!("saved {} releases to {}", releases.len(), path.display());
    Ok(())
}

/// Load a sidecar written by [`save_releases`].
pub fn load_releases(path: &Path) -> Result<Vec<Release>, SidecarError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|e| SidecarError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}
