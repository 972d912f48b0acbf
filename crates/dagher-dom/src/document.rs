//! Arena-backed document tree.
//!
//! Nodes live in a single `Vec` owned by the [`Document`] and are addressed by
//! [`NodeId`] handles. Nodes are never freed individually: detaching a subtree
//! only unlinks it from its parent, so handles held elsewhere stay valid and
//! can be checked with [`Document::is_connected`].

use std::collections::{BTreeSet, HashMap};

use crate::event::EventKind;

/// Tag of the synthetic root element every document starts with.
const ROOT_TAG: &str = "#document";

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element payload: tag name and ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// An element with attributes and children.
    Element(Element),
    /// A run of character data.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Horizontal alignment requested by a scroll-into-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align the leading edge with the start of the scroll container.
    Start,
    /// Scroll the minimum distance needed.
    Nearest,
}

/// How a scroll-into-view is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Animate smoothly.
    Smooth,
}

/// One recorded scroll-into-view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRecord {
    /// Element scrolled into view.
    pub target: NodeId,
    /// Animation behaviour.
    pub behavior: ScrollBehavior,
    /// Inline alignment.
    pub inline: ScrollAlign,
}

/// In-memory document.
///
/// Besides the tree itself the document tracks the state a host page would
/// own: the focused element, scroll requests, registered event listeners and a
/// counter of observable mutations.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
    scrolls: Vec<ScrollRecord>,
    listeners: HashMap<NodeId, BTreeSet<EventKind>>,
    mutations: u64,
}

impl Document {
    /// Create an empty document containing only the root element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            data: NodeData::Element(Element {
                tag: ROOT_TAG.to_owned(),
                attrs: Vec::new(),
            }),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            focused: None,
            scrolls: Vec::new(),
            listeners: HashMap::new(),
            mutations: 0,
        }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_owned()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Node payload.
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    /// Tag name, or `None` for text nodes.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element(el) => Some(&el.tag),
            NodeData::Text(_) => None,
        }
    }

    /// Whether the node is an element with the given tag.
    #[must_use]
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id) == Some(tag)
    }

    /// Parent node, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Child nodes in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Element children in order (text nodes skipped).
    #[must_use]
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.tag(child).is_some())
            .collect()
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        self.mutations += 1;
    }

    /// Append text to `parent`, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(&last) = self.children(parent).last()
            && let NodeData::Text(existing) = &mut self.node_mut(last).data
        {
            existing.push_str(text);
            self.mutations += 1;
            return;
        }
        let node = self.create_text(text);
        self.append_child(parent, node);
    }

    /// Unlink a node from its parent. The subtree itself is kept intact.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        self.node_mut(parent).children.retain(|&c| c != id);
        self.node_mut(id).parent = None;
        self.mutations += 1;
    }

    /// Replace all children of `parent` with `children`.
    pub fn replace_children(&mut self, parent: NodeId, children: &[NodeId]) {
        let old = std::mem::take(&mut self.node_mut(parent).children);
        for child in old {
            self.node_mut(child).parent = None;
        }
        self.mutations += 1;
        for &child in children {
            self.append_child(parent, child);
        }
    }

    /// Whether the node is reachable from the document root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).last() == Some(&self.root)
    }

    /// Ancestors from the parent up to the topmost attached node.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            out.push(node);
            current = self.parent(node);
        }
        out
    }

    /// Whether `ancestor` contains `id` (inclusive).
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Element descendants matching `predicate`, in document order.
    pub fn query_all<F>(&self, id: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Self, NodeId) -> bool,
    {
        self.descendants(id)
            .into_iter()
            .filter(|&node| self.tag(node).is_some() && predicate(self, node))
            .collect()
    }

    /// First element descendant matching `predicate`.
    pub fn query<F>(&self, id: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Self, NodeId) -> bool,
    {
        self.descendants(id)
            .into_iter()
            .find(|&node| self.tag(node).is_some() && predicate(self, node))
    }

    /// Element descendants with the given tag.
    #[must_use]
    pub fn elements_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.query_all(id, |doc, node| doc.is_tag(node, tag))
    }

    /// Connected element whose `id` attribute equals `element_id`.
    #[must_use]
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.query(self.root, |doc, node| {
            doc.attribute(node, "id") == Some(element_id)
        })
    }

    /// Concatenated text of the node and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeData::Text(text) = &self.node(id).data {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let NodeData::Text(text) = &self.node(node).data {
                out.push_str(text);
            }
        }
        out
    }

    /// Copy a subtree. The copy is detached and carries no listeners.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let data = self.node(id).data.clone();
        let copy = self.push(data);
        let children = self.children(id).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child);
            self.node_mut(child_copy).parent = Some(copy);
            self.node_mut(copy).children.push(child_copy);
        }
        copy
    }

    // Attributes

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id).data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id).data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// All attributes in order.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.element(id).map_or(&[], |el| el.attrs.as_slice())
    }

    /// Set an attribute. Returns `true` if the stored value changed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        let changed = match el.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) if existing == value => false,
            Some((_, existing)) => {
                value.clone_into(existing);
                true
            }
            None => {
                el.attrs.push((name.to_owned(), value.to_owned()));
                true
            }
        };
        if changed {
            self.mutations += 1;
        }
        changed
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Some(el) = self.element_mut(id) else {
            return false;
        };
        let before = el.attrs.len();
        el.attrs.retain(|(key, _)| key != name);
        let removed = el.attrs.len() != before;
        if removed {
            self.mutations += 1;
        }
        removed
    }

    /// Set or remove a valueless boolean attribute such as `hidden`.
    pub fn set_flag(&mut self, id: NodeId, name: &str, on: bool) -> bool {
        if on {
            if self.has_attribute(id, name) {
                return false;
            }
            self.set_attribute(id, name, "")
        } else {
            self.remove_attribute(id, name)
        }
    }

    /// The `role` attribute.
    #[must_use]
    pub fn role(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "role")
    }

    /// Class names from the `class` attribute.
    #[must_use]
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the element carries the class.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).contains(&class)
    }

    /// Add or remove a class. Returns `true` if the class list changed.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) -> bool {
        let mut classes: Vec<String> = self.classes(id).into_iter().map(str::to_owned).collect();
        let present = classes.iter().any(|c| c == class);
        match (present, on) {
            (false, true) => classes.push(class.to_owned()),
            (true, false) => classes.retain(|c| c != class),
            _ => return false,
        }
        if classes.is_empty() {
            self.remove_attribute(id, "class")
        } else {
            self.set_attribute(id, "class", &classes.join(" "))
        }
    }

    // Focus and scrolling

    /// Currently focused element.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move keyboard focus to `id`.
    ///
    /// Unless `prevent_scroll` is set the element is also scrolled into view
    /// the way a browser does on focus. Returns `false` for detached nodes.
    pub fn focus(&mut self, id: NodeId, prevent_scroll: bool) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        self.focused = Some(id);
        if !prevent_scroll {
            self.scroll_into_view(id, ScrollBehavior::Instant, ScrollAlign::Nearest);
        }
        true
    }

    /// Drop focus from whatever holds it.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Record a scroll-into-view request.
    pub fn scroll_into_view(&mut self, id: NodeId, behavior: ScrollBehavior, inline: ScrollAlign) {
        self.scrolls.push(ScrollRecord {
            target: id,
            behavior,
            inline,
        });
    }

    /// Scroll requests in the order they were made.
    #[must_use]
    pub fn scroll_log(&self) -> &[ScrollRecord] {
        &self.scrolls
    }

    // Listeners

    /// Register a listener. Returns `false` if one was already registered.
    pub fn add_event_listener(&mut self, id: NodeId, kind: EventKind) -> bool {
        self.listeners.entry(id).or_default().insert(kind)
    }

    /// Remove a listener. Returns `true` if one was registered.
    pub fn remove_event_listener(&mut self, id: NodeId, kind: EventKind) -> bool {
        let Some(kinds) = self.listeners.get_mut(&id) else {
            return false;
        };
        let removed = kinds.remove(&kind);
        if kinds.is_empty() {
            self.listeners.remove(&id);
        }
        removed
    }

    /// Whether a listener of `kind` is registered on the node.
    #[must_use]
    pub fn has_event_listener(&self, id: NodeId, kind: EventKind) -> bool {
        self.listeners.get(&id).is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Number of nodes with a listener of `kind` registered.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|kinds| kinds.contains(&kind)).count()
    }

    /// Number of observable tree and attribute mutations so far.
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
