//! HTML serializer.

use std::fmt::Write;

use crate::document::{Document, NodeData, NodeId};
use crate::is_void_element;

/// Attributes written without a value when empty.
const BOOLEAN_ATTRIBUTES: &[&str] = &["hidden", "open", "disabled", "checked", "selected"];

/// Serializer settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    /// Put element-only children on their own indented lines.
    pub pretty: bool,
}

/// Serialize document subtrees back to HTML.
pub struct HtmlSerializer {
    options: SerializeOptions,
}

impl HtmlSerializer {
    /// Create a serializer with the given options.
    #[must_use]
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }

    /// Serialize a node including its own tag.
    #[must_use]
    pub fn serialize(&self, doc: &Document, node: NodeId) -> String {
        let mut out = String::with_capacity(1024);
        self.write_node(doc, node, 0, &mut out);
        out
    }

    /// Serialize the children of a node (its inner HTML).
    #[must_use]
    pub fn serialize_children(&self, doc: &Document, node: NodeId) -> String {
        let mut out = String::with_capacity(4096);
        if self.options.pretty {
            for &child in doc.children(node) {
                if is_blank_text(doc, child) {
                    continue;
                }
                self.write_node(doc, child, 0, &mut out);
                out.push('\n');
            }
        } else {
            for &child in doc.children(node) {
                self.write_node(doc, child, 0, &mut out);
            }
        }
        out
    }

    fn write_node(&self, doc: &Document, node: NodeId, depth: usize, out: &mut String) {
        let el = match doc.data(node) {
            NodeData::Text(text) => {
                out.push_str(&escape_text(text));
                return;
            }
            NodeData::Element(el) => el,
        };

        out.push('<');
        out.push_str(&el.tag);
        for (key, value) in &el.attrs {
            if value.is_empty() && BOOLEAN_ATTRIBUTES.contains(&key.as_str()) {
                let _ = write!(out, " {key}");
            } else {
                let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
            }
        }
        out.push('>');

        if is_void_element(&el.tag) {
            return;
        }

        let children = doc.children(node);
        if self.options.pretty && !children.is_empty() && is_element_only(doc, node) {
            for &child in children {
                if is_blank_text(doc, child) {
                    continue;
                }
                newline(out, depth + 1);
                self.write_node(doc, child, depth + 1, out);
            }
            newline(out, depth);
        } else {
            for &child in children {
                self.write_node(doc, child, depth + 1, out);
            }
        }

        let _ = write!(out, "</{}>", el.tag);
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new(SerializeOptions::default())
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    out.push_str(&"  ".repeat(depth));
}

fn is_blank_text(doc: &Document, node: NodeId) -> bool {
    matches!(doc.data(node), NodeData::Text(text) if text.trim().is_empty())
}

/// Whether every child is an element or whitespace.
fn is_element_only(doc: &Document, node: NodeId) -> bool {
    doc.children(node)
        .iter()
        .all(|&child| doc.tag(child).is_some() || is_blank_text(doc, child))
}

/// Escape text content.
fn escape_text(text: &str) -> String {
    escape_html(text, false)
}

/// Escape attribute values.
fn escape_attr(text: &str) -> String {
    escape_html(text, true)
}

fn escape_html(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
