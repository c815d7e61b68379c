//! Output writer: clears the generated subtree and writes a fresh package.
//!
//! ## `write_package` protocol
//!
//! 1. Package is already rendered and formatted in memory (caller).
//! 2. Delete the files iconsync owns (package files, manifest) under the root.
//! 3. Write each artifact to `<path>.iconsync.tmp`, then rename into place.
//! 4. Write `VERSION` when the package has a tag.
//! 5. Save the manifest of SHA-256 digests.
//!
//! A failure in steps 2-5 leaves a partially regenerated root; the next run
//! regenerates it in full.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use iconsync_renderer::{GeneratedPackage, GENERATED_FILES};

use crate::error::{io_err, SyncError};
use crate::manifest::{self, Manifest, MANIFEST_FILE};

pub const VERSION_FILE: &str = "VERSION";

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
    /// A stale generated file was deleted before regeneration.
    Removed { path: PathBuf },
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Write `content` to `path` through a sibling `.iconsync.tmp` file.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.iconsync.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    // Normalise line endings to LF before writing.
    let content = content.replace("\r\n", "\n");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, &content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// VERSION marker
// ---------------------------------------------------------------------------

/// The tag recorded by the last successful run, if any.
pub fn read_version(output_root: &Path) -> Result<Option<String>, SyncError> {
    let path = output_root.join(VERSION_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content.trim().to_string()).filter(|v| !v.is_empty())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

pub fn write_version(output_root: &Path, tag: &str) -> Result<PathBuf, SyncError> {
    let path = output_root.join(VERSION_FILE);
    atomic_write(&path, &format!("{tag}\n"))?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// write_package
// ---------------------------------------------------------------------------

fn is_generated(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name == MANIFEST_FILE || GENERATED_FILES.contains(&name)
}

/// Delete the files iconsync owns directly under `output_root`.
///
/// Anything else in the directory, hand-written modules included, is left
/// alone. `VERSION` is only replaced when a tagged package is written.
pub fn clear_generated(output_root: &Path) -> Result<Vec<WriteResult>, SyncError> {
    let entries = match std::fs::read_dir(output_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(output_root, e)),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(output_root, e))?;
        let path = entry.path();
        if path.is_file() && is_generated(&path) {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            tracing::debug!("removed: {}", path.display());
            removed.push(WriteResult::Removed { path });
        }
    }
    Ok(removed)
}

/// Replace the generated subtree at `output_root` with `package`.
///
/// In dry-run mode nothing is touched and every target is reported as
/// [`WriteResult::WouldWrite`].
pub fn write_package(
    output_root: &Path,
    package: &GeneratedPackage,
    dry_run: bool,
) -> Result<Vec<WriteResult>, SyncError> {
    let mut targets: Vec<PathBuf> = package
        .artifacts
        .iter()
        .map(|a| output_root.join(&a.relative_path))
        .collect();
    if package.tag.is_some() {
        targets.push(output_root.join(VERSION_FILE));
    }

    if dry_run {
        for path in &targets {
            tracing::info!("[dry-run] would write: {}", path.display());
        }
        return Ok(targets
            .into_iter()
            .map(|path| WriteResult::WouldWrite { path })
            .collect());
    }

    let mut results = clear_generated(output_root)?;
    let mut digests = std::collections::BTreeMap::new();
    for artifact in &package.artifacts {
        let path = output_root.join(&artifact.relative_path);
        atomic_write(&path, &artifact.contents)?;
        tracing::info!("wrote: {}", path.display());
        digests.insert(
            artifact.relative_path.to_string_lossy().replace('\\', "/"),
            manifest::digest(&artifact.contents),
        );
        results.push(WriteResult::Written { path });
    }

    if let Some(tag) = &package.tag {
        let path = write_version(output_root, tag)?;
        tracing::info!("recorded version {tag}");
        results.push(WriteResult::Written { path });
    }

    manifest::save_at(
        output_root,
        &Manifest {
            tag: package.tag.clone(),
            generated_at: Utc::now(),
            files: digests,
        },
    )?;
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use iconsync_renderer::Artifact;
    use std::fs;
    use tempfile::TempDir;

    fn package(tag: Option<&str>) -> GeneratedPackage {
        GeneratedPackage {
            tag: tag.map(str::to_string),
            artifacts: vec![
                Artifact {
                    relative_path: PathBuf::from("icons.rs"),
                    contents: "pub fn A() {}\n".to_string(),
                },
                Artifact {
                    relative_path: PathBuf::from("icons.tera"),
                    contents: "{% macro A() %}{% endmacro A %}\n".to_string(),
                },
            ],
            icon_count: 1,
            symbols: Vec::new(),
        }
    }

    #[test]
    fn regeneration_replaces_owned_files_and_keeps_others() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("icons");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("rollup.rs"), "old").unwrap();
        fs::write(root.join("extras.rs"), "pub fn custom() {}").unwrap();
        fs::write(root.join("README.md"), "keep me").unwrap();

        let results = write_package(&root, &package(Some("1.0.0")), false).expect("write");
        assert!(results.contains(&WriteResult::Removed {
            path: root.join("rollup.rs")
        }));
        assert!(!root.join("rollup.rs").exists(), "not part of this package");
        assert_eq!(fs::read_to_string(root.join("extras.rs")).unwrap(), "pub fn custom() {}");
        assert!(root.join("README.md").exists());
        assert_eq!(fs::read_to_string(root.join("icons.rs")).unwrap(), "pub fn A() {}\n");
        assert_eq!(read_version(&root).unwrap().as_deref(), Some("1.0.0"));

        let manifest = manifest::load_at(&root).unwrap().expect("manifest");
        assert_eq!(manifest.tag.as_deref(), Some("1.0.0"));
        assert_eq!(manifest.files.len(), 2);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("icons");
        let results = write_package(&root, &package(Some("1.0.0")), true).expect("dry run");
        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|r| matches!(r, WriteResult::WouldWrite { .. })));
        assert!(!root.exists());
    }

    #[test]
    fn untagged_package_leaves_version_alone() {
        let tmp = TempDir::new().unwrap();
        write_version(tmp.path(), "0.9.0").unwrap();
        write_package(tmp.path(), &package(None), false).unwrap();
        assert_eq!(read_version(tmp.path()).unwrap().as_deref(), Some("0.9.0"));
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("icons.rs");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("icons.rs.iconsync.tmp");

        let result = atomic_write_with_tmp(&path, "new content", &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root can rename into read-only directories; only check when it failed.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp_path.exists(), ".iconsync.tmp should be cleaned up");
        }
    }
}
