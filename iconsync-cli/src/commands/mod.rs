//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use iconsync_core::SyncConfig;
use iconsync_sync::{ReleaseSource, SidecarReleases, WriteResult};

use crate::github::GithubReleases;

pub mod diff;
pub mod generate;
pub mod releases;
pub mod status;
pub mod sync;

pub(crate) fn load_config(path: &Path) -> Result<SyncConfig> {
    SyncConfig::load(path).with_context(|| format!("failed to load config '{}'", path.display()))
}

/// The saved sidecar when `releases` is given, the GitHub API otherwise.
pub(crate) fn release_source(releases: Option<PathBuf>) -> Box<dyn ReleaseSource> {
    match releases {
        Some(path) => Box::new(SidecarReleases::new(path)),
        None => Box::new(GithubReleases::from_env()),
    }
}

pub(crate) fn print_writes(results: &[WriteResult]) {
    for r in results {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Removed { path } => println!("  ✗  {}", path.display()),
        }
    }
}
