//! Runtime support shared by the generated icon functions.
//!
//! Generated by iconsync. Do not edit: the module is rewritten on every sync.

/// One group of caller-supplied attributes, as `(name, value)` pairs.
pub type Attributes<'a> = &'a [(&'a str, &'a str)];

/// Render a root `<svg>` element around `body` and `children`.
///
/// Caller attributes override the icon defaults by name, later groups
/// winning. Caller `class` values are appended to `class` instead.
pub fn render_icon(
    class: &str,
    defaults: &[(&str, &str)],
    body: &str,
    attrs: &[Attributes<'_>],
    children: &str,
) -> String {
    let mut classes = vec![class];
    let mut merged: Vec<(&str, &str)> = defaults.to_vec();
    for group in attrs {
        for &(name, value) in group.iter() {
            if name == "class" {
                if !value.is_empty() {
                    classes.push(value);
                }
                continue;
            }
            match merged.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => merged.push((name, value)),
            }
        }
    }

    let mut out = String::with_capacity(body.len() + children.len() + 256);
    out.push_str("<svg");
    for (name, value) in &merged {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        push_escaped(&mut out, value);
        out.push('"');
    }
    out.push_str(" class=\"");
    push_escaped(&mut out, &classes.join(" "));
    out.push_str("\">");
    out.push_str(body);
    out.push_str(children);
    out.push_str("</svg>");
    out
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
