//! `iconsync.yaml` project configuration.
//!
//! Every field has a default, so a missing file is equivalent to an empty
//! one. Relative paths resolve against the directory holding the file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "iconsync.yaml";

/// Upstream icon project: where releases come from and where it is cloned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub owner: String,
    pub repo: String,
    /// Clone URL; derived from `owner`/`repo` when absent.
    pub url: Option<String>,
    pub checkout: PathBuf,
    pub icons_dir: PathBuf,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            owner: "lucide-icons".to_string(),
            repo: "lucide".to_string(),
            url: None,
            checkout: PathBuf::from(".iconsync/lucide"),
            icons_dir: PathBuf::from("icons"),
        }
    }
}

/// Downstream package: tag source, generated subtree and release sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownstreamConfig {
    pub repo: PathBuf,
    pub output: PathBuf,
    pub releases_file: PathBuf,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            output: PathBuf::from("src/icons"),
            releases_file: PathBuf::from("releases.json"),
        }
    }
}

/// Immutable code generation settings, built once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// Namespace class; each icon also gets `<prefix>-<basename>`.
    pub class_prefix: String,
    /// Upstream project name used in generated doc comments.
    pub display_name: String,
    /// Rust path the rollup re-exports icon functions from.
    pub icons_module: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            class_prefix: "lucide".to_string(),
            display_name: "Lucide".to_string(),
            icons_module: "super::icons".to_string(),
        }
    }
}

/// Root of `iconsync.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    pub upstream: UpstreamConfig,
    pub downstream: DownstreamConfig,
    pub codegen: CodegenOptions,
    /// Ignore releases published at or before this instant.
    pub since: Option<DateTime<Utc>>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl SyncConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            serde_yaml::from_str::<SyncConfig>(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            SyncConfig::default()
        };
        config.base_dir = base_dir;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a usable run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.owner.trim().is_empty() || self.upstream.repo.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "upstream.owner and upstream.repo must be set".to_string(),
            ));
        }
        if self.codegen.class_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "codegen.class_prefix must not be empty".to_string(),
            ));
        }
        if self.codegen.icons_module.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "codegen.icons_module must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn upstream_url(&self) -> String {
        self.upstream.url.clone().unwrap_or_else(|| {
            format!(
                "https://github.com/{}/{}.git",
                self.upstream.owner, self.upstream.repo
            )
        })
    }

    pub fn upstream_checkout(&self) -> PathBuf {
        self.resolve(&self.upstream.checkout)
    }

    /// `<checkout>/<icons_dir>`
    pub fn snapshot_root(&self) -> PathBuf {
        self.upstream_checkout().join(&self.upstream.icons_dir)
    }

    pub fn downstream_repo(&self) -> PathBuf {
        self.resolve(&self.downstream.repo)
    }

    pub fn output_root(&self) -> PathBuf {
        self.resolve(&self.downstream.output)
    }

    pub fn releases_file(&self) -> PathBuf {
        self.resolve(&self.downstream.releases_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = SyncConfig::load(&tmp.path().join(CONFIG_FILE)).expect("load");
        assert_eq!(config.upstream.owner, "lucide-icons");
        assert_eq!(config.upstream_url(), "https://github.com/lucide-icons/lucide.git");
        assert_eq!(config.output_root(), tmp.path().join("src/icons"));
        assert_eq!(
            config.snapshot_root(),
            tmp.path().join(".iconsync/lucide").join("icons")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "codegen:\n  class_prefix: feather\nsince: 2024-01-01T00:00:00Z\n",
        )
        .unwrap();
        let config = SyncConfig::load(&path).expect("load");
        assert_eq!(config.codegen.class_prefix, "feather");
        assert_eq!(config.codegen.display_name, "Lucide");
        assert!(config.since.is_some());
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "codegen:\n  class_prefix: ''\n").unwrap();
        let err = SyncConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "upstream: [unclosed").unwrap();
        let err = SyncConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
