//! Headless document model for Dagher widgets.
//!
//! Widgets run against a [`Document`]: an arena of elements and text nodes
//! that also tracks the page state a browser would own (focus owner, scroll
//! requests, registered listeners). Markup enters through [`HtmlParser`] and
//! leaves through [`HtmlSerializer`].
//!
//! # Example
//!
//! ```
//! use dagher_dom::{HtmlParser, HtmlSerializer, SerializeOptions};
//!
//! let doc = HtmlParser::new()
//!     .parse("<details><summary>Alpha</summary><p>One</p></details>")
//!     .unwrap();
//! let details = doc.elements_by_tag(doc.root(), "details")[0];
//! assert_eq!(doc.text_content(details), "AlphaOne");
//!
//! let html = HtmlSerializer::new(SerializeOptions::default()).serialize(&doc, details);
//! assert_eq!(html, "<details><summary>Alpha</summary><p>One</p></details>");
//! ```

mod document;
mod entities;
mod error;
mod event;
mod parser;
mod serializer;

pub use document::{
    Document, Element, NodeData, NodeId, ScrollAlign, ScrollBehavior, ScrollRecord,
};
pub use entities::convert_html_entities;
pub use error::DomError;
pub use event::{EventKind, EventOutcome, Key, KeyboardEvent, UiEvent};
pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, SerializeOptions};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}
