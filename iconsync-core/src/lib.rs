//! iconsync core library: domain types, snapshot ingestion, version
//! reconciliation, configuration and the release sidecar.
//!
//! - [`types`]: [`Release`], [`IconDefinition`], [`IconName`]
//! - [`catalog`]: [`ingest`] an icon snapshot directory
//! - [`reconcile`]: [`missing_since`] and next-release selection
//! - [`config`]: `iconsync.yaml`
//! - [`sidecar`]: persisted release list

pub mod catalog;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod sidecar;
pub mod types;

pub use catalog::{ingest, IconCatalog};
pub use config::{CodegenOptions, SyncConfig};
pub use error::{CatalogError, ConfigError, ParseError, ReconcileError, SidecarError};
pub use reconcile::{missing_since, normalize_tag, select_next, sort_releases, MissingSet};
pub use types::{to_canonical_ident, IconDefinition, IconName, Release};
