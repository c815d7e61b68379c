//! Unified diffs of a rendered package against the files on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use iconsync_renderer::GeneratedPackage;

use crate::error::{io_err, SyncError};

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Compare every artifact of `package` with its counterpart under
/// `output_root`. Files that would be created diff against an empty file.
///
/// No files are written.
pub fn diff_package(output_root: &Path, package: &GeneratedPackage) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();
    for artifact in &package.artifacts {
        let path = output_root.join(&artifact.relative_path);
        let rendered = normalize_line_endings(&artifact.contents);
        let existing = read_existing_or_empty(&path)?;
        if existing == rendered {
            continue;
        }

        let old_header = format!("a/{}", artifact.relative_path.display());
        let new_header = format!("b/{}", artifact.relative_path.display());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path,
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}
