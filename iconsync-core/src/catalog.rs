//! Icon snapshot ingestion.
//!
//! A snapshot is a flat directory of `<basename>.svg` files, each optionally
//! paired with `<basename>.json` metadata:
//!
//! ```text
//! icons/
//!   arrow-left.svg
//!   arrow-left.json   {"aliases": ["chevron-back", {"name": "back"}], ...}
//!   house.svg
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CatalogError, ParseError};
use crate::types::{IconDefinition, IconName};

/// An ingested snapshot: icons in directory enumeration order plus the
/// alias diagnostics that were skipped along the way.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    pub icons: Vec<IconDefinition>,
    pub diagnostics: Vec<ParseError>,
}

impl IconCatalog {
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct IconMetadata {
    #[serde(default)]
    aliases: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AliasEntry {
    Bare(String),
    Named { name: String },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.into(),
        source,
    }
}

/// Ingest every `*.svg` under `snapshot_root`.
///
/// Alias metadata problems are recorded in [`IconCatalog::diagnostics`] and
/// never abort ingestion; unreadable files do.
pub fn ingest(snapshot_root: &Path) -> Result<IconCatalog, CatalogError> {
    if !snapshot_root.is_dir() {
        return Err(CatalogError::SnapshotNotFound {
            path: snapshot_root.to_path_buf(),
        });
    }

    let mut catalog = IconCatalog::default();
    let entries = std::fs::read_dir(snapshot_root).map_err(|e| io_err(snapshot_root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(snapshot_root, e))?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("svg") || !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!("skipping non UTF-8 file name: {}", path.display());
            continue;
        };

        let body = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let mut icon = IconDefinition::new(stem, body);

        let meta_path = snapshot_root.join(format!("{stem}.json"));
        if meta_path.is_file() {
            let raw = std::fs::read_to_string(&meta_path).map_err(|e| io_err(&meta_path, e))?;
            for alias in parse_aliases(&meta_path, &raw, &mut catalog.diagnostics) {
                icon.push_alias(alias);
            }
        }

        catalog.icons.push(icon);
    }

    tracing::info!(
        "ingested {} icons from {} ({} alias diagnostics)",
        catalog.icons.len(),
        snapshot_root.display(),
        catalog.diagnostics.len()
    );
    Ok(catalog)
}

/// Parse the `aliases` array of one metadata file.
///
/// Accepts bare strings and `{"name": ...}` objects; anything else becomes a
/// [`ParseError`] pushed onto `diagnostics`.
pub fn parse_aliases(path: &Path, raw: &str, diagnostics: &mut Vec<ParseError>) -> Vec<IconName> {
    let mut report = |entry: String, reason: String| {
        let err = ParseError {
            path: path.to_path_buf(),
            entry,
            reason,
        };
        tracing::warn!("{err}");
        diagnostics.push(err);
    };

    let meta: IconMetadata = match serde_json::from_str(raw) {
        Ok(meta) => meta,
        Err(e) => {
            report(String::new(), format!("invalid metadata JSON: {e}"));
            return Vec::new();
        }
    };

    let entries = match meta.aliases {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            report(String::new(), format!("`aliases` must be an array, got {other}"));
            return Vec::new();
        }
    };

    let mut aliases = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<AliasEntry>(entry.clone()) {
            Ok(AliasEntry::Bare(name) | AliasEntry::Named { name }) => match alias_problem(&name) {
                None => aliases.push(IconName::from(name.trim())),
                Some(reason) => report(entry.to_string(), reason.to_string()),
            },
            Err(_) => report(
                entry.to_string(),
                "expected a string or an object with a `name` field".to_string(),
            ),
        }
    }
    aliases
}

fn alias_problem(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name.is_empty() {
        Some("alias name is empty")
    } else if name.chars().any(char::is_control) {
        Some("alias name contains control characters")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
