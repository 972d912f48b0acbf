//! Content transformation from disclosure blocks to tabs.
//!
//! Turns the `details` blocks of a host into:
//!
//! ```html
//! <ul role="tablist">
//!   <li role="tab" id="tab-1" aria-selected="true" aria-controls="panel-1">
//!     <button type="button" tabindex="0">macOS</button>
//!   </li>
//!   <li role="tab" id="tab-2" aria-selected="false" aria-controls="panel-2">
//!     <button type="button" tabindex="-1">Linux</button>
//!   </li>
//! </ul>
//! <section role="tabpanel" id="panel-1" aria-labelledby="tab-1"><!-- content --></section>
//! <section role="tabpanel" id="panel-2" aria-labelledby="tab-2" hidden><!-- content --></section>
//! ```
//!
//! When the document carries a `<template id="tab-group-structure">`, a copy
//! of its content replaces the bare `ul` and the tabs go into its tab list.

use dagher_dom::{Document, NodeId};

use crate::error::TabGroupError;
use crate::ids::{IdAllocator, PairId};

/// ID of the optional template providing the markup around the tab list.
pub const STRUCTURE_TEMPLATE_ID: &str = "tab-group-structure";

/// Nodes generated for one tab group.
#[derive(Debug, Clone)]
pub(crate) struct Structure {
    pub tab_list: NodeId,
    /// `li[role=tab]` elements.
    pub tabs: Vec<NodeId>,
    /// Buttons inside the tabs.
    pub controls: Vec<NodeId>,
    /// `section[role=tabpanel]` elements.
    pub panels: Vec<NodeId>,
    pub ids: Vec<PairId>,
    pub titles: Vec<String>,
}

impl Structure {
    pub(crate) fn len(&self) -> usize {
        self.controls.len()
    }
}

/// A validated source block.
struct Source {
    details: NodeId,
    title: String,
}

/// Build the tab structure for `host` and swap it in for the host's children.
///
/// Every block is validated and the base structure resolved before the first
/// identifier is allocated, so a failure leaves the host and the allocator
/// untouched.
pub(crate) fn transform(
    doc: &mut Document,
    host: NodeId,
    ids: &mut IdAllocator,
) -> Result<Structure, TabGroupError> {
    let sources = collect_sources(doc, host)?;
    let (base, tab_list) = build_base(doc)?;

    let mut structure = Structure {
        tab_list,
        tabs: Vec::with_capacity(sources.len()),
        controls: Vec::with_capacity(sources.len()),
        panels: Vec::with_capacity(sources.len()),
        ids: Vec::with_capacity(sources.len()),
        titles: Vec::with_capacity(sources.len()),
    };

    for (index, source) in sources.into_iter().enumerate() {
        let selected = index == 0;
        let pair_id = ids.allocate();
        let tab_id = pair_id.tab_id();
        let panel_id = pair_id.panel_id();

        let tab = doc.create_element("li");
        doc.set_attribute(tab, "role", "tab");
        doc.set_attribute(tab, "id", &tab_id);
        doc.set_attribute(tab, "aria-selected", if selected { "true" } else { "false" });
        doc.set_attribute(tab, "aria-controls", &panel_id);

        let button = doc.create_element("button");
        doc.set_attribute(button, "type", "button");
        doc.set_attribute(button, "tabindex", if selected { "0" } else { "-1" });
        doc.append_text(button, &source.title);
        doc.append_child(tab, button);
        doc.append_child(tab_list, tab);

        let panel = doc.create_element("section");
        doc.set_attribute(panel, "role", "tabpanel");
        doc.set_attribute(panel, "id", &panel_id);
        doc.set_flag(panel, "hidden", !selected);
        doc.set_attribute(panel, "aria-labelledby", &tab_id);
        for child in panel_content(doc, source.details) {
            doc.append_child(panel, child);
        }

        structure.tabs.push(tab);
        structure.controls.push(button);
        structure.panels.push(panel);
        structure.ids.push(pair_id);
        structure.titles.push(source.title);
    }

    let mut children = base;
    children.extend_from_slice(&structure.panels);
    doc.replace_children(host, &children);

    tracing::debug!(
        host = host.index(),
        tabs = structure.len(),
        "Transformed disclosure blocks into tabs"
    );

    Ok(structure)
}

/// Find the host's blocks and their titles, failing on the first untitled one.
fn collect_sources(doc: &Document, host: NodeId) -> Result<Vec<Source>, TabGroupError> {
    doc.elements_by_tag(host, "details")
        .into_iter()
        .enumerate()
        .map(|(index, details)| -> Result<Source, TabGroupError> {
            let summary = doc
                .query(details, |d, node| d.is_tag(node, "summary"))
                .ok_or(TabGroupError::MissingTitle { index })?;
            Ok(Source {
                details,
                title: doc.text_content(summary).trim().to_owned(),
            })
        })
        .collect()
}

/// Resolve the nodes preceding the panels and the tab list among them.
fn build_base(doc: &mut Document) -> Result<(Vec<NodeId>, NodeId), TabGroupError> {
    let template = doc
        .element_by_id(STRUCTURE_TEMPLATE_ID)
        .filter(|&node| doc.is_tag(node, "template"));

    let Some(template) = template else {
        let list = doc.create_element("ul");
        doc.set_attribute(list, "role", "tablist");
        return Ok((vec![list], list));
    };

    let originals = doc.children(template).to_vec();
    let copies: Vec<NodeId> = originals.into_iter().map(|n| doc.deep_clone(n)).collect();
    let tab_list = copies
        .iter()
        .find_map(|&node| {
            if doc.role(node) == Some("tablist") {
                Some(node)
            } else {
                doc.query(node, |d, n| d.role(n) == Some("tablist"))
            }
        })
        .ok_or(TabGroupError::MissingTabList)?;

    Ok((copies, tab_list))
}

/// Deep copy of a block's content without its title.
fn panel_content(doc: &mut Document, details: NodeId) -> Vec<NodeId> {
    let copy = doc.deep_clone(details);
    if let Some(summary) = doc.query(copy, |d, node| d.is_tag(node, "summary")) {
        doc.detach(summary);
    }
    doc.children(copy).to_vec()
}
