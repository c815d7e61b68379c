//! Generation manifest: SHA-256 of every file the last run wrote.
//!
//! Persisted as `<output_root>/.iconsync-manifest.json` so `status` can tell
//! when generated files were edited by hand.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{io_err, SyncError};

pub const MANIFEST_FILE: &str = ".iconsync-manifest.json";

/// On-disk manifest payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub tag: Option<String>,
    pub generated_at: DateTime<Utc>,
    /// Relative path → SHA-256 hex digest.
    pub files: BTreeMap<String, String>,
}

pub fn manifest_path_at(output_root: &Path) -> PathBuf {
    output_root.join(MANIFEST_FILE)
}

pub fn digest(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

/// Load the manifest, or `None` if nothing was generated yet.
pub fn load_at(output_root: &Path) -> Result<Option<Manifest>, SyncError> {
    let path = manifest_path_at(output_root);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

pub fn save_at(output_root: &Path, manifest: &Manifest) -> Result<(), SyncError> {
    let path = manifest_path_at(output_root);
    let json = serde_json::to_string_pretty(manifest)?;
    crate::writer::atomic_write(&path, &format!("{json}\n"))
}

/// Files listed in `manifest` whose content no longer matches (or which are gone).
pub fn modified_files(output_root: &Path, manifest: &Manifest) -> Result<Vec<PathBuf>, SyncError> {
    let mut modified = Vec::new();
    for (relative, expected) in &manifest.files {
        let path = output_root.join(relative);
        match std::fs::read_to_string(&path) {
            Ok(content) if &digest(&content.replace("\r\n", "\n")) == expected => {}
            Ok(_) => modified.push(PathBuf::from(relative)),
            Err(e) if e.kind() == ErrorKind::NotFound => modified.push(PathBuf::from(relative)),
            Err(e) => return Err(io_err(path, e)),
        }
    }
    Ok(modified)
}
