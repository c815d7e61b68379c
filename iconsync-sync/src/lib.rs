//! # iconsync-sync
//!
//! Release reconciliation run, collaborator seams and the output writer.
//!
//! Call [`pipeline::run`] to synchronize the next missing release, or
//! [`pipeline::generate_from_dir`] to generate from a local icon directory.

pub mod diff;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod source;
pub mod vcs;
pub mod writer;

pub use diff::{diff_package, FileDiff};
pub use error::SyncError;
pub use pipeline::{
    diff_from_dir, fetch_releases, generate_from_dir, run, status, GenerateOutcome, RunOptions,
    StatusReport, SyncOutcome,
};
pub use source::{ReleaseSource, SidecarReleases};
pub use vcs::{GitCli, Vcs};
pub use writer::{read_version, write_package, WriteResult};
