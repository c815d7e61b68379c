//! Rollup assembly: canonical names and aliases merged into one namespace.
//!
//! Canonical identifiers are claimed first, then aliases in
//! icon-then-declaration order. The first claim on an identifier wins and
//! later duplicates are dropped. The result is sorted by exported name so
//! the generated file is stable across runs.

use std::collections::BTreeMap;

use serde::Serialize;

use iconsync_core::{CodegenOptions, IconDefinition};

use crate::context::doc_line;

/// One exported name in the rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupSymbol {
    pub exported_name: String,
    /// Identifier of the generated function this name re-exports.
    pub target_ident: String,
    pub target_basename: String,
    pub doc_comment: String,
    pub is_alias: bool,
}

/// Compute the rollup symbols for `icons`, sorted by exported name.
///
/// `icons` are processed in basename order, so the result does not depend on
/// the order the catalog enumerated them in.
pub fn assemble(icons: &[IconDefinition], options: &CodegenOptions) -> Vec<RollupSymbol> {
    let mut ordered: Vec<&IconDefinition> = icons.iter().collect();
    ordered.sort_by(|a, b| a.basename.cmp(&b.basename));

    let mut claimed: BTreeMap<String, RollupSymbol> = BTreeMap::new();

    for icon in &ordered {
        let ident = icon.canonical_ident();
        if claimed.contains_key(&ident) {
            tracing::debug!("canonical name {ident} already claimed; skipping {}", icon.basename);
            continue;
        }
        claimed.insert(
            ident.clone(),
            RollupSymbol {
                exported_name: ident.clone(),
                target_ident: ident,
                target_basename: icon.basename.to_string(),
                doc_comment: doc_line(&format!(
                    "Renders the {} icon `{}`.",
                    options.display_name, icon.basename
                )),
                is_alias: false,
            },
        );
    }

    for icon in &ordered {
        let target = icon.canonical_ident();
        for alias in &icon.aliases {
            let name = alias.canonical_ident();
            if let Some(existing) = claimed.get(&name) {
                tracing::debug!(
                    "alias {alias} of {} dropped: {name} already points at {}",
                    icon.basename,
                    existing.target_basename
                );
                continue;
            }
            claimed.insert(
                name.clone(),
                RollupSymbol {
                    exported_name: name,
                    target_ident: target.clone(),
                    target_basename: icon.basename.to_string(),
                    doc_comment: doc_line(&format!(
                        "Alias for `{target}` (`{}`). Renders the {} icon `{alias}`.",
                        icon.basename, options.display_name
                    )),
                    is_alias: true,
                },
            );
        }
    }

    claimed.into_values().collect()
}
