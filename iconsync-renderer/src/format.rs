//! Canonical formatting for generated artifacts.
//!
//! Rust output goes through a `syn` parse, `prettyplease` printing and a
//! second parse of the printed text. Tera output is whitespace-normalized
//! and then parsed by Tera. Both formatters are idempotent.

use tera::Tera;

use crate::error::{error_chain, generation_err, RenderError};

/// Parse, pretty-print and re-parse a Rust source file.
pub fn format_rust(artifact: &str, source: &str) -> Result<String, RenderError> {
    let file = syn::parse_file(source).map_err(|e| generation_err(artifact, e))?;
    let formatted = prettyplease::unparse(&file);
    syn::parse_file(&formatted)
        .map_err(|e| generation_err(artifact, format!("formatted output does not parse: {e}")))?;
    Ok(formatted)
}

/// Normalize a Tera source file and check that Tera accepts it.
///
/// Line endings become LF, trailing whitespace is stripped, runs of blank
/// lines collapse to one and the file ends with a single newline.
pub fn format_template(artifact: &str, source: &str) -> Result<String, RenderError> {
    let mut formatted = String::with_capacity(source.len());
    let mut blank_run = true;
    for line in source.replace("\r\n", "\n").lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if blank_run {
                continue;
            }
            blank_run = true;
        } else {
            blank_run = false;
        }
        formatted.push_str(line);
        formatted.push('\n');
    }
    while formatted.ends_with("\n\n") {
        formatted.pop();
    }

    let mut tera = Tera::default();
    tera.add_raw_template(artifact, &formatted)
        .map_err(|e| generation_err(artifact, error_chain(&e)))?;
    Ok(formatted)
}
