//! Response encoders, one per wire format.
//!
//! Encoders only ever see apps that resolved to an available update. Up to
//! date and dropped apps produce no output at all.

pub mod legacy;
pub mod omaha;

use std::borrow::Cow;

/// Attributes carried by the root element of every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub protocol: String,
    pub server: String,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            protocol: "3.1".to_string(),
            server: "prod".to_string(),
        }
    }
}

const INDENT: &str = "    ";

/// Escape an attribute value. Line breaks become character references so
/// that every rendered element stays on one line for [`indent`].
fn escape(value: &str) -> Cow<'_, str> {
    let escaped = quick_xml::escape::escape(value);
    if escaped.contains(['\n', '\r']) {
        Cow::Owned(escaped.replace('\n', "&#10;").replace('\r', "&#13;"))
    } else {
        escaped
    }
}

/// Wrap already rendered children in the root element. An empty child list
/// yields `<root ...></root>` on a single line.
fn document(root: &str, meta: &ResponseMeta, children: &[String]) -> String {
    let mut out = format!(
        r#"<{root} protocol="{}" server="{}">"#,
        escape(&meta.protocol),
        escape(&meta.server)
    );

    for child in children {
        out.push('\n');
        out.push_str(child);
    }
    if !children.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("</{root}>"));
    out
}

/// Prefix every line of `block` with `level` indents.
fn indent(block: &str, level: usize) -> String {
    let prefix = INDENT.repeat(level);
    block
        .lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
