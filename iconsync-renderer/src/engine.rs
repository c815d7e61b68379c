//! Code generation engine: [`Generator`] and the artifacts it produces.
//!
//! # Generated package layout
//!
//! | File         | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | `icons.tera` | One Tera macro per icon, for Tera-based callers            |
//! | `icons.rs`   | One Rust function per icon                                 |
//! | `rollup.rs`  | `pub use` of every canonical name and unique alias         |
//! | `support.rs` | `render_icon` runtime helper (static)                      |
//! | `mod.rs`     | Module declarations (static)                               |

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use tera::Tera;

use iconsync_core::{CodegenOptions, IconDefinition};

use crate::context::IconContext;
use crate::error::{template_err, RenderError};
use crate::format::{format_rust, format_template};
use crate::rollup::{assemble, RollupSymbol};

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const ICON_FN: &str = "icon_fn.rs.tera";
const ICONS_RS: &str = "icons.rs.tera";
const ROLLUP_RS: &str = "rollup.rs.tera";

const TPLS: &[(&str, &str)] = &[
    (ICON_FN, include_str!("templates/icon_fn.rs.tera")),
    (ICONS_RS, include_str!("templates/icons.rs.tera")),
    (ROLLUP_RS, include_str!("templates/rollup.rs.tera")),
];

const SUPPORT_RS: &str = include_str!("templates/support.rs");
const MOD_RS: &str = include_str!("templates/mod.rs");

pub const TEMPLATE_FILE: &str = "icons.tera";
pub const ICONS_FILE: &str = "icons.rs";
pub const ROLLUP_FILE: &str = "rollup.rs";
pub const SUPPORT_FILE: &str = "support.rs";
pub const MOD_FILE: &str = "mod.rs";

/// Every file name a generated package owns, relative to the output root.
pub const GENERATED_FILES: &[&str] = &[TEMPLATE_FILE, ICONS_FILE, ROLLUP_FILE, SUPPORT_FILE, MOD_FILE];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TPLS.iter().copied())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One icon rendered in both target forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    pub ident: String,
    pub basename: String,
    /// Tera macro definition.
    pub template: String,
    /// Rust function definition.
    pub function: String,
}

/// A formatted file ready to be written under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub relative_path: PathBuf,
    pub contents: String,
}

/// The complete, formatted output for one snapshot. Built entirely in memory.
#[derive(Debug, Clone)]
pub struct GeneratedPackage {
    pub tag: Option<String>,
    pub artifacts: Vec<Artifact>,
    pub icon_count: usize,
    pub symbols: Vec<RollupSymbol>,
}

impl GeneratedPackage {
    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.relative_path == PathBuf::from(name))
    }
}

#[derive(Serialize)]
struct FileCtx<'a> {
    display_name: &'a str,
    tag: Option<&'a str>,
    functions: Vec<&'a str>,
}

#[derive(Serialize)]
struct RollupCtx<'a> {
    display_name: &'a str,
    tag: Option<&'a str>,
    icons_module: &'a str,
    symbols: &'a [RollupSymbol],
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Immutable code generation pipeline.
///
/// Templates are parsed once in [`Generator::new`]; the generator is then
/// passed by reference for the rest of the run.
pub struct Generator {
    tera: Tera,
    options: CodegenOptions,
}

impl Generator {
    pub fn new(options: &CodegenOptions) -> Result<Self, RenderError> {
        syn::parse_str::<syn::Path>(&options.icons_module).map_err(|e| {
            RenderError::InvalidOptions(format!(
                "icons_module `{}` is not a Rust path: {e}",
                options.icons_module
            ))
        })?;
        if options.class_prefix.contains('"') || options.class_prefix.trim().is_empty() {
            return Err(RenderError::InvalidOptions(format!(
                "class_prefix `{}` cannot be used as an HTML class",
                options.class_prefix
            )));
        }
        Ok(Generator {
            tera: build_tera()?,
            options: options.clone(),
        })
    }

    /// Render one icon into its Tera macro and Rust function.
    pub fn render(&self, icon: &IconDefinition) -> Result<SourceFragment, RenderError> {
        let ctx = IconContext::from_icon(icon, &self.options)?;
        let function = self.tera.render(ICON_FN, &ctx.to_tera_context()?)?;
        Ok(SourceFragment {
            template: template_macro(&ctx),
            ident: ctx.ident,
            basename: ctx.basename,
            function,
        })
    }

    /// Render, assemble and format the full package for `icons`.
    ///
    /// Nothing is written; any failure leaves the caller with no partial
    /// output.
    pub fn generate(
        &self,
        icons: &[IconDefinition],
        tag: Option<&str>,
    ) -> Result<GeneratedPackage, RenderError> {
        let mut ordered: Vec<&IconDefinition> = icons.iter().collect();
        ordered.sort_by(|a, b| a.basename.cmp(&b.basename));

        let mut owners: HashMap<String, String> = HashMap::new();
        let mut fragments = Vec::with_capacity(ordered.len());
        for icon in ordered {
            let fragment = self.render(icon)?;
            if let Some(owner) = owners.insert(fragment.ident.clone(), fragment.basename.clone()) {
                return Err(template_err(
                    &fragment.basename,
                    format!("identifier {} is already generated for '{owner}'", fragment.ident),
                ));
            }
            fragments.push(fragment);
        }

        let templates: Vec<&str> = fragments.iter().map(|f| f.template.as_str()).collect();
        let template_file = format_template(TEMPLATE_FILE, &templates.join("\n"))?;

        let file_ctx = FileCtx {
            display_name: &self.options.display_name,
            tag,
            functions: fragments.iter().map(|f| f.function.as_str()).collect(),
        };
        let icons_src = self
            .tera
            .render(ICONS_RS, &tera::Context::from_serialize(&file_ctx)?)?;
        let icons_file = format_rust(ICONS_FILE, &icons_src)?;

        let symbols = assemble(icons, &self.options);
        let rollup_file = self.render_rollup(&symbols, tag)?;

        let artifacts = vec![
            artifact(TEMPLATE_FILE, template_file),
            artifact(ICONS_FILE, icons_file),
            artifact(ROLLUP_FILE, rollup_file),
            artifact(SUPPORT_FILE, format_rust(SUPPORT_FILE, SUPPORT_RS)?),
            artifact(MOD_FILE, format_rust(MOD_FILE, MOD_RS)?),
        ];

        tracing::info!(
            "generated {} icons and {} rollup symbols",
            fragments.len(),
            symbols.len()
        );
        Ok(GeneratedPackage {
            tag: tag.map(str::to_string),
            artifacts,
            icon_count: fragments.len(),
            symbols,
        })
    }

    /// Render and format the rollup module for already-assembled symbols.
    pub fn render_rollup(
        &self,
        symbols: &[RollupSymbol],
        tag: Option<&str>,
    ) -> Result<String, RenderError> {
        let ctx = RollupCtx {
            display_name: &self.options.display_name,
            tag,
            icons_module: &self.options.icons_module,
            symbols,
        };
        let src = self
            .tera
            .render(ROLLUP_RS, &tera::Context::from_serialize(&ctx)?)?;
        format_rust(ROLLUP_FILE, &src)
    }
}

fn artifact(name: &str, contents: String) -> Artifact {
    Artifact {
        relative_path: PathBuf::from(name),
        contents,
    }
}

/// The Tera macro for one icon.
///
/// Caller attributes are emitted first so an HTML parser keeps them over the
/// icon defaults that follow. The body sits in a raw block and is never
/// interpreted by Tera.
fn template_macro(ctx: &IconContext) -> String {
    let defaults: String = ctx
        .root_attributes
        .iter()
        .map(|a| format!(" {}=\"{}\"", a.name, a.value.replace('"', "&quot;")))
        .collect();
    format!(
        concat!(
            "{{# Renders the {display} icon {basename}. #}}\n",
            "{{% macro {ident}(attrs=\"\", class=\"\", children=\"\") %}}\n",
            "<svg{{% if attrs %}} {{{{ attrs | safe }}}}{{% endif %}} ",
            "class=\"{class}{{% if class %}} {{{{ class }}}}{{% endif %}}\"",
            "{{% raw %}}{defaults}>\n",
            "{body}\n",
            "{{% endraw %}}{{{{ children | safe }}}}</svg>\n",
            "{{% endmacro {ident} %}}\n",
        ),
        display = ctx.display_name,
        basename = ctx.basename,
        ident = ctx.ident,
        class = ctx.class,
        defaults = defaults,
        body = ctx.body,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
