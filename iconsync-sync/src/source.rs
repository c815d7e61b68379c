//! Release-listing collaborator.

use std::path::PathBuf;

use iconsync_core::{reconcile::sort_releases, sidecar, Release};

use crate::error::SyncError;

/// Lists published, non-draft, non-prerelease releases of a repository.
///
/// Implementations handle pagination and filtering; the result must be
/// sorted newest-first.
pub trait ReleaseSource {
    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, SyncError>;
}

/// Replays a previously saved release sidecar instead of calling the API.
#[derive(Debug, Clone)]
pub struct SidecarReleases {
    pub path: PathBuf,
}

impl SidecarReleases {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReleaseSource for SidecarReleases {
    fn list_releases(&self, _owner: &str, _repo: &str) -> Result<Vec<Release>, SyncError> {
        let mut releases = sidecar::load_releases(&self.path)?;
        sort_releases(&mut releases);
        Ok(releases)
    }
}
