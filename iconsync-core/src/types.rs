//! Domain types shared by every iconsync crate.
//!
//! [`Release`] mirrors the on-disk sidecar record; [`IconDefinition`] is one
//! ingested SVG plus its aliases.

use std::fmt;

use chrono::{DateTime, Utc};
use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A hyphenated icon or alias name, e.g. `arrow-left`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IconName(pub String);

impl IconName {
    /// The capitalized-compound identifier for this name (`arrow-left` → `ArrowLeft`).
    pub fn canonical_ident(&self) -> String {
        to_canonical_ident(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for IconName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IconName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Capitalized identifiers Rust reserves; `self` would otherwise become one.
const RESERVED_IDENTS: &[&str] = &["Self"];

/// Convert a hyphenated name into an exported identifier.
///
/// Each `-`-separated segment is upper-camel-cased and the segments are
/// concatenated. Characters outside ASCII alphanumerics are dropped. A result
/// that would not be a valid identifier gets an `Icon` prefix.
pub fn to_canonical_ident(name: &str) -> String {
    let ident: String = name
        .split('-')
        .map(|segment| segment.to_upper_camel_case())
        .collect::<String>()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let needs_prefix = ident.is_empty()
        || ident.starts_with(|c: char| c.is_ascii_digit())
        || RESERVED_IDENTS.contains(&ident.as_str());
    if needs_prefix {
        format!("Icon{ident}")
    } else {
        ident
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One published upstream release.
///
/// Field names on the wire follow the release sidecar:
/// `{id, tag_name, name, zipball_url, url, html_url, published_at}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: i64,
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(default)]
    pub zipball_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub html_url: String,
    pub published_at: DateTime<Utc>,
}

/// A single icon: its basename, raw SVG markup and declared aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDefinition {
    pub basename: IconName,
    pub raw_vector_body: String,
    /// Declaration order, without repeats.
    pub aliases: Vec<IconName>,
}

impl IconDefinition {
    pub fn new(basename: impl Into<IconName>, raw_vector_body: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            raw_vector_body: raw_vector_body.into(),
            aliases: Vec::new(),
        }
    }

    /// Builder-style helper used by tests and the catalog.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<IconName>,
    {
        for alias in aliases {
            self.push_alias(alias.into());
        }
        self
    }

    /// Append an alias unless this icon already declares it.
    pub fn push_alias(&mut self, alias: IconName) {
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
    }

    pub fn canonical_ident(&self) -> String {
        self.basename.canonical_ident()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
