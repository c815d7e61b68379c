//! Template context: serializable rendering payload built from an
//! [`IconDefinition`].

use serde::Serialize;

use iconsync_core::{CodegenOptions, IconDefinition};

use crate::error::{template_err, RenderError};
use crate::markup::extract_body;

/// One root attribute, raw and as Rust string literals.
#[derive(Debug, Clone, Serialize)]
pub struct AttrCtx {
    pub name: String,
    pub value: String,
    pub name_literal: String,
    pub value_literal: String,
}

/// Everything the per-icon templates need.
#[derive(Debug, Clone, Serialize)]
pub struct IconContext {
    pub basename: String,
    pub ident: String,
    pub display_name: String,
    /// `"<prefix> <prefix>-<basename>"`
    pub class: String,
    pub class_literal: String,
    /// Root attributes minus any `class`, which `class` replaces.
    pub root_attributes: Vec<AttrCtx>,
    pub body: String,
    pub body_literal: String,
}

/// Flatten `s` onto one line so it can sit inside a `///` comment.
pub(crate) fn doc_line(s: &str) -> String {
    s.split(|c: char| c.is_control() || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render `s` as a Rust string literal.
pub(crate) fn rust_literal(s: &str) -> String {
    format!("{s:?}")
}

impl IconContext {
    /// Build the context for `icon`, extracting its root attributes and body.
    pub fn from_icon(icon: &IconDefinition, options: &CodegenOptions) -> Result<Self, RenderError> {
        let basename = icon.basename.as_str();
        let parts = extract_body(basename, &icon.raw_vector_body)?;
        if parts.body.contains("{%") || parts.body.contains("%}") {
            return Err(template_err(basename, "body contains template tag delimiters"));
        }

        let class = format!(
            "{prefix} {prefix}-{basename}",
            prefix = options.class_prefix
        );
        let root_attributes = parts
            .attributes
            .into_iter()
            .filter(|(name, _)| name != "class")
            .map(|(name, value)| AttrCtx {
                name_literal: rust_literal(&name),
                value_literal: rust_literal(&value),
                name,
                value,
            })
            .collect();

        Ok(IconContext {
            basename: basename.to_string(),
            ident: icon.canonical_ident(),
            display_name: doc_line(&options.display_name),
            class_literal: rust_literal(&class),
            class,
            root_attributes,
            body_literal: rust_literal(&parts.body),
            body: parts.body,
        })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
