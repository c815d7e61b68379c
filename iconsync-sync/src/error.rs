//! Error types for iconsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use iconsync_core::{CatalogError, ConfigError, ReconcileError, SidecarError};
use iconsync_renderer::RenderError;

/// All errors that can arise from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the code generator.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The icon snapshot could not be ingested.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Nothing to synchronize. Callers report this instead of failing.
    #[error("{0}")]
    Reconcile(#[from] ReconcileError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("release sidecar error: {0}")]
    Sidecar(#[from] SidecarError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A version-control command exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    Vcs {
        command: String,
        status: String,
        stderr: String,
    },

    /// The release source could not list releases.
    #[error("release source error: {0}")]
    Source(String),

    /// JSON serialization/deserialization error (manifest).
    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    /// `true` when the run ended because there was nothing to do.
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(self, SyncError::Reconcile(_))
    }
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
