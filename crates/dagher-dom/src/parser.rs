//! HTML fragment parser built on quick-xml.
//!
//! Accepts XML-compatible markup with the usual HTML leniencies: valueless
//! and unquoted attributes, void elements without a closing tag, named HTML
//! entities and mismatched end tags.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::{Document, NodeId};
use crate::entities::{convert_html_entities, decode_entity};
use crate::error::DomError;
use crate::is_void_element;

/// Parses markup into a [`Document`].
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a fragment into a fresh document, under its root.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup cannot be read.
    pub fn parse(&self, html: &str) -> Result<Document, DomError> {
        let mut doc = Document::new();
        let root = doc.root();
        self.parse_into(&mut doc, root, html)?;
        Ok(doc)
    }

    /// Parse a fragment and append the resulting nodes to `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup cannot be read.
    pub fn parse_into(&self, doc: &mut Document, parent: NodeId, html: &str) -> Result<(), DomError> {
        let html = convert_html_entities(html);

        let mut reader = Reader::from_str(&html);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = false;
        // Nesting is tracked by `open` in `parse_events`, not by the reader.
        reader.config_mut().allow_unmatched_ends = true;

        self.parse_events(&mut reader, doc, parent)
    }

    fn parse_events<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        doc: &mut Document,
        parent: NodeId,
    ) -> Result<(), DomError> {
        let mut buf = Vec::new();
        // Open elements with their tag names, innermost last.
        let mut open: Vec<(NodeId, String)> = Vec::new();

        loop {
            let current = open.last().map_or(parent, |(node, _)| *node);
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let node = self.create_element(doc, reader, &e);
                    doc.append_child(current, node);
                    let tag = self.decode_tag_from_bytes(reader, e.name().as_ref());
                    if !is_void_element(&tag) {
                        open.push((node, tag));
                    }
                }
                Event::Empty(e) => {
                    let node = self.create_element(doc, reader, &e);
                    doc.append_child(current, node);
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    doc.append_text(current, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    doc.append_text(current, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    doc.append_text(current, &String::from_utf8_lossy(&e));
                }
                Event::End(e) => {
                    let end_tag = self.decode_tag_from_bytes(reader, e.name().as_ref());
                    // Close up to the matching element; stray end tags are dropped.
                    if let Some(pos) = open.iter().rposition(|(_, tag)| *tag == end_tag) {
                        open.truncate(pos);
                    }
                }
                Event::Eof => return Ok(()),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn create_element<R: BufRead>(
        &self,
        doc: &mut Document,
        reader: &Reader<R>,
        e: &BytesStart,
    ) -> NodeId {
        let tag = self.decode_tag_from_bytes(reader, e.name().as_ref());
        let node = doc.create_element(&tag);
        for attr in e.html_attributes().flatten() {
            let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
                |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                std::borrow::Cow::into_owned,
            );
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );
            doc.set_attribute(node, &key.to_ascii_lowercase(), &value);
        }
        node
    }

    fn decode_tag_from_bytes<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader
            .decoder()
            .decode(name)
            .map_or_else(
                |_| String::from_utf8_lossy(name).into_owned(),
                std::borrow::Cow::into_owned,
            )
            .to_ascii_lowercase()
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
