//! Error types for iconsync-core.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while ingesting an icon snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unreadable directory, definition, or metadata file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot root does not exist.
    #[error("icon snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },
}

/// A malformed alias entry or metadata file.
///
/// Never fatal: the catalog logs it, keeps it as a diagnostic and carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub path: PathBuf,
    /// The offending JSON fragment, or empty when the whole file is unusable.
    pub entry: String,
    pub reason: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entry.is_empty() {
            write!(f, "{}: {}", self.path.display(), self.reason)
        } else {
            write!(
                f,
                "{}: skipped alias {}: {}",
                self.path.display(),
                self.entry,
                self.reason
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// Reconciliation found nothing to synchronize.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The release source returned no releases at all.
    #[error("no upstream releases available")]
    NoReleases,

    /// Every release up to the newest is already mirrored.
    #[error("already up to date with {latest}")]
    UpToDate { latest: String },
}

/// Failures loading `iconsync.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failures reading or writing the release sidecar.
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("release sidecar JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
