//! Shared run entrypoints used by every CLI command.
//!
//! [`run`] is one full synchronization: reconcile, check out, ingest,
//! generate, write. At most one release is processed per call.

use std::path::{Path, PathBuf};

use serde::Serialize;

use iconsync_core::{
    ingest, missing_since, reconcile::filter_published_after, select_next, sidecar,
    sort_releases, CodegenOptions, ParseError, ReconcileError, Release, SyncConfig,
};
use iconsync_renderer::Generator;

use crate::{
    diff::{diff_package, FileDiff},
    manifest,
    source::ReleaseSource,
    vcs::Vcs,
    writer::{read_version, write_package, WriteResult},
    SyncError,
};

/// Switches for a [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop before any write; report what would be written.
    pub dry_run: bool,
    /// Persist the fetched release list to the configured sidecar.
    pub save_sidecar: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            save_sidecar: true,
        }
    }
}

/// Result of generating one snapshot into an output root.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub tag: Option<String>,
    pub icon_count: usize,
    pub symbol_count: usize,
    /// Alias entries skipped during ingestion.
    pub diagnostics: Vec<ParseError>,
    pub results: Vec<WriteResult>,
}

/// Result of a full [`run`].
#[derive(Debug)]
pub struct SyncOutcome {
    pub release: Release,
    /// Releases still missing after this one, oldest excluded.
    pub remaining: usize,
    pub generated: GenerateOutcome,
}

/// Read-only view of where the downstream package stands.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Missing releases, newest first.
    pub missing: Vec<Release>,
    pub latest_matched: Option<Release>,
    pub next: Option<Release>,
    /// Contents of the `VERSION` marker.
    pub current_version: Option<String>,
    /// Generated files edited since the last generation.
    pub modified: Vec<PathBuf>,
}

/// List releases from `source`, applying the configured `since` bound.
pub fn fetch_releases(config: &SyncConfig, source: &dyn ReleaseSource) -> Result<Vec<Release>, SyncError> {
    let mut releases = source.list_releases(&config.upstream.owner, &config.upstream.repo)?;
    if let Some(since) = config.since {
        releases = filter_published_after(releases, since);
    }
    sort_releases(&mut releases);
    tracing::info!(
        "{} releases for {}/{}",
        releases.len(),
        config.upstream.owner,
        config.upstream.repo
    );
    Ok(releases)
}

/// Report missing releases, the current marker and hand-edited files.
pub fn status(
    config: &SyncConfig,
    source: &dyn ReleaseSource,
    vcs: &dyn Vcs,
) -> Result<StatusReport, SyncError> {
    let releases = fetch_releases(config, source)?;
    let tags = vcs.list_tags(&config.downstream_repo())?;
    let missing = missing_since(&tags, &releases);

    let output_root = config.output_root();
    let modified = match manifest::load_at(&output_root)? {
        Some(m) => manifest::modified_files(&output_root, &m)?,
        None => Vec::new(),
    };

    Ok(StatusReport {
        missing: missing.missing.to_vec(),
        latest_matched: missing.latest_matched.cloned(),
        next: missing.next_to_sync().cloned(),
        current_version: read_version(&output_root)?,
        modified,
    })
}

/// Synchronize the oldest release not yet tagged downstream.
///
/// Returns [`SyncError::Reconcile`] when there is nothing to do.
pub fn run(
    config: &SyncConfig,
    source: &dyn ReleaseSource,
    vcs: &dyn Vcs,
    options: RunOptions,
) -> Result<SyncOutcome, SyncError> {
    // Options are validated before any network or VCS work.
    let generator = Generator::new(&config.codegen)?;

    let releases = fetch_releases(config, source)?;
    if options.save_sidecar && !options.dry_run {
        sidecar::save_releases(&config.releases_file(), &releases)?;
    }
    if releases.is_empty() {
        return Err(ReconcileError::NoReleases.into());
    }

    let tags = vcs.list_tags(&config.downstream_repo())?;
    let missing = missing_since(&tags, &releases);
    let release = select_next(&releases, &missing)?.clone();
    let remaining = missing.len() - 1;
    tracing::info!(
        "syncing release {} ({} more pending)",
        release.tag,
        remaining
    );

    let checkout = config.upstream_checkout();
    vcs.clone_repo(&config.upstream_url(), &checkout)?;
    vcs.fetch_tags(&checkout)?;
    vcs.checkout(&release.tag, &checkout)?;

    let generated = generate_with(
        &generator,
        &config.snapshot_root(),
        &config.output_root(),
        Some(&release.tag),
        options.dry_run,
    )?;

    Ok(SyncOutcome {
        release,
        remaining,
        generated,
    })
}

/// Generate from a local icon directory, without VCS or network access.
pub fn generate_from_dir(
    icons_dir: &Path,
    output_root: &Path,
    codegen: &CodegenOptions,
    tag: Option<&str>,
    dry_run: bool,
) -> Result<GenerateOutcome, SyncError> {
    let generator = Generator::new(codegen)?;
    generate_with(&generator, icons_dir, output_root, tag, dry_run)
}

/// Render a local icon directory in memory and diff it against `output_root`.
pub fn diff_from_dir(
    icons_dir: &Path,
    output_root: &Path,
    codegen: &CodegenOptions,
) -> Result<Vec<FileDiff>, SyncError> {
    let generator = Generator::new(codegen)?;
    let catalog = ingest(icons_dir)?;
    let package = generator.generate(&catalog.icons, None)?;
    diff_package(output_root, &package)
}

fn generate_with(
    generator: &Generator,
    icons_dir: &Path,
    output_root: &Path,
    tag: Option<&str>,
    dry_run: bool,
) -> Result<GenerateOutcome, SyncError> {
    let catalog = ingest(icons_dir)?;
    let package = generator.generate(&catalog.icons, tag)?;
    let results = write_package(output_root, &package, dry_run)?;
    Ok(GenerateOutcome {
        tag: package.tag,
        icon_count: package.icon_count,
        symbol_count: package.symbols.len(),
        diagnostics: catalog.diagnostics,
        results,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;

    struct FakeSource(Vec<Release>);

    impl ReleaseSource for FakeSource {
        fn list_releases(&self, _owner: &str, _repo: &str) -> Result<Vec<Release>, SyncError> {
            Ok(self.0.clone())
        }
    }

    /// Downstream tags are fixed; checkout writes a per-tag icon set.
    #[derive(Default)]
    struct FakeVcs {
        tags: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl Vcs for FakeVcs {
        fn list_tags(&self, _path: &Path) -> Result<Vec<String>, SyncError> {
            self.calls.borrow_mut().push("tag".to_string());
            Ok(self.tags.clone())
        }

        fn clone_repo(&self, _url: &str, path: &Path) -> Result<(), SyncError> {
            self.calls.borrow_mut().push("clone".to_string());
            fs::create_dir_all(path.join("icons")).unwrap();
            Ok(())
        }

        fn fetch_tags(&self, _path: &Path) -> Result<(), SyncError> {
            self.calls.borrow_mut().push("fetch".to_string());
            Ok(())
        }

        fn checkout(&self, tag: &str, path: &Path) -> Result<(), SyncError> {
            self.calls.borrow_mut().push(format!("checkout {tag}"));
            let icons = path.join("icons");
            fs::write(icons.join("house.svg"), "<svg width=\"24\"><path d=\"M3 9\" /></svg>").unwrap();
            fs::write(icons.join("house.json"), r#"{"aliases": ["home"]}"#).unwrap();
            if tag == "0.3.0" {
                fs::write(icons.join("star.svg"), "<svg><circle r=\"1\" /></svg>").unwrap();
            }
            Ok(())
        }
    }

    fn release(tag: &str, day: u32) -> Release {
        Release {
            id: day as i64,
            tag: tag.to_string(),
            display_name: format!("Lucide {tag}"),
            zipball_url: String::new(),
            url: String::new(),
            html_url: String::new(),
            published_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn config(root: &Path) -> SyncConfig {
        SyncConfig::load(&root.join("iconsync.yaml")).expect("config")
    }

    fn releases() -> FakeSource {
        FakeSource(vec![release("0.1.0", 1), release("0.3.0", 3), release("0.2.0", 2)])
    }

    #[test]
    fn run_syncs_oldest_missing_release() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path());
        let vcs = FakeVcs {
            tags: vec!["v0.1.0".to_string()],
            ..Default::default()
        };

        let outcome = run(&config, &releases(), &vcs, RunOptions::default()).expect("run");
        assert_eq!(outcome.release.tag, "0.2.0");
        assert_eq!(outcome.remaining, 1);
        assert_eq!(outcome.generated.icon_count, 1);
        assert_eq!(outcome.generated.symbol_count, 2);
        assert_eq!(
            *vcs.calls.borrow(),
            vec!["tag", "clone", "fetch", "checkout 0.2.0"]
        );

        let output = config.output_root();
        assert_eq!(read_version(&output).unwrap().as_deref(), Some("0.2.0"));
        assert!(fs::read_to_string(output.join("rollup.rs"))
            .unwrap()
            .contains("pub use super::icons::House as Home;"));
        let saved = sidecar::load_releases(&config.releases_file()).expect("sidecar");
        assert_eq!(saved[0].tag, "0.3.0");
    }

    #[test]
    fn up_to_date_is_reported_not_failed() {
        let tmp = TempDir::new().unwrap();
        let vcs = FakeVcs {
            tags: vec!["0.3.0".to_string()],
            ..Default::default()
        };
        let err = run(&config(tmp.path()), &releases(), &vcs, RunOptions::default()).unwrap_err();
        assert!(err.is_nothing_to_do());
        assert!(matches!(
            err,
            SyncError::Reconcile(ReconcileError::UpToDate { ref latest }) if latest == "0.3.0"
        ));
        assert!(!vcs.calls.borrow().iter().any(|c| c.starts_with("checkout")));
    }

    #[test]
    fn no_releases_is_reported() {
        let tmp = TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let err = run(
            &config(tmp.path()),
            &FakeSource(Vec::new()),
            &vcs,
            RunOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Reconcile(ReconcileError::NoReleases)));
        assert!(!vcs.calls.borrow().iter().any(|c| c == "tag"));
    }

    #[test]
    fn dry_run_writes_neither_output_nor_sidecar() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path());
        let options = RunOptions {
            dry_run: true,
            save_sidecar: true,
        };
        let outcome = run(&config, &releases(), &FakeVcs::default(), options).expect("run");
        assert_eq!(outcome.release.tag, "0.1.0");
        assert!(outcome
            .generated
            .results
            .iter()
            .all(|r| matches!(r, WriteResult::WouldWrite { .. })));
        assert!(!config.output_root().exists());
        assert!(!config.releases_file().exists());
    }

    #[test]
    fn since_bound_hides_older_releases() {
        let tmp = TempDir::new().unwrap();
        let mut config = config(tmp.path());
        config.since = Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
        let tags: Vec<String> = fetch_releases(&config, &releases())
            .unwrap()
            .into_iter()
            .map(|r| r.tag)
            .collect();
        assert_eq!(tags, vec!["0.3.0", "0.2.0"]);
    }

    #[test]
    fn status_reports_pending_and_edited_files() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path());
        let vcs = FakeVcs {
            tags: vec!["0.1.0".to_string()],
            ..Default::default()
        };
        run(&config, &releases(), &vcs, RunOptions::default()).expect("run");
        fs::write(config.output_root().join("icons.rs"), "// edited\n").unwrap();

        let report = status(&config, &releases(), &vcs).expect("status");
        let missing: Vec<&str> = report.missing.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(missing, vec!["0.3.0", "0.2.0"]);
        assert_eq!(report.next.map(|r| r.tag).as_deref(), Some("0.2.0"));
        assert_eq!(report.latest_matched.map(|r| r.tag).as_deref(), Some("0.1.0"));
        assert_eq!(report.current_version.as_deref(), Some("0.2.0"));
        assert_eq!(report.modified, vec![PathBuf::from("icons.rs")]);
    }

    #[test]
    fn invalid_options_fail_before_any_vcs_work() {
        let tmp = TempDir::new().unwrap();
        let mut config = config(tmp.path());
        config.codegen.icons_module = "not a path".to_string();
        let vcs = FakeVcs::default();
        let err = run(&config, &releases(), &vcs, RunOptions::default()).unwrap_err();
        assert!(matches!(err, SyncError::Render(_)), "got: {err}");
        assert!(vcs.calls.borrow().is_empty());
    }
}
