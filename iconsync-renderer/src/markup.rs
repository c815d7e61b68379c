//! Root `<svg>` extraction.
//!
//! This is a split heuristic, not an XML parser: take the text after the
//! last `<svg` marker, cut at the first `>`, and treat the left side as root
//! attributes and the right side as the body. Everything before the marker
//! (XML prolog, comments) is discarded. Callers only see [`extract_body`],
//! so a structured parser can replace it later.

use crate::error::{template_err, RenderError};

const OPEN_MARKER: &str = "<svg";
const CLOSE_TAG: &str = "</svg>";

/// Root attributes and inner markup of one SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgParts {
    /// `(name, value)` in source order.
    pub attributes: Vec<(String, String)>,
    pub body: String,
}

/// Split `markup` into root attributes and embeddable body.
///
/// `icon` is only used for error messages.
pub fn extract_body(icon: &str, markup: &str) -> Result<SvgParts, RenderError> {
    let (_, tail) = markup
        .rsplit_once(OPEN_MARKER)
        .ok_or_else(|| template_err(icon, "no <svg> element found"))?;
    let closing = tail
        .find('>')
        .ok_or_else(|| template_err(icon, "<svg> opening tag is never closed"))?;

    let raw_attributes = tail[..closing].trim_end().trim_end_matches('/');
    let attributes =
        parse_attributes(raw_attributes).map_err(|message| template_err(icon, message))?;
    let body = tail[closing + 1..].replace(CLOSE_TAG, "").trim().to_string();

    Ok(SvgParts { attributes, body })
}

fn parse_attributes(raw: &str) -> Result<Vec<(String, String)>, String> {
    let mut attributes = Vec::new();
    let mut rest = raw.trim_start();
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        if name.is_empty() {
            return Err(format!("unexpected `{rest}` in <svg> attributes"));
        }
        rest = rest[name_end..].trim_start();

        let Some(value_part) = rest.strip_prefix('=') else {
            attributes.push((name.to_string(), String::new()));
            continue;
        };
        let value_part = value_part.trim_start();
        let quote = match value_part.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(format!("attribute `{name}` has an unquoted value")),
        };
        let close = value_part[1..]
            .find(quote)
            .ok_or_else(|| format!("attribute `{name}` has an unterminated value"))?;
        attributes.push((name.to_string(), value_part[1..1 + close].to_string()));
        rest = value_part[close + 2..].trim_start();
    }
    Ok(attributes)
}
