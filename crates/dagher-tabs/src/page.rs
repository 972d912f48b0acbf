//! A page hosting tab groups.
//!
//! [`Page`] owns the document together with everything shared by the groups
//! on it: the pair identifier allocator and the frame scheduler. Interactions
//! enter through [`Page::dispatch`] and its helpers; deferred focus and scroll
//! work runs in [`Page::run_frame`].

use dagher_dom::{
    Document, EventOutcome, HtmlParser, HtmlSerializer, KeyboardEvent, NodeId, ScrollAlign,
    ScrollBehavior, SerializeOptions, UiEvent,
};

use crate::config::{HostDefaults, is_observed};
use crate::error::TabGroupError;
use crate::frames::{FrameScheduler, FrameTask};
use crate::group::TabGroup;
use crate::ids::IdAllocator;

/// Tag name of tab group host elements.
pub const HOST_TAG: &str = "dagher-tab-group";

/// Document plus the tab groups mounted in it.
#[derive(Debug)]
pub struct Page {
    document: Document,
    ids: IdAllocator,
    frames: FrameScheduler,
    groups: Vec<TabGroup>,
}

impl Page {
    /// Wrap an existing document. Nothing is mounted yet.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ids: IdAllocator::new(),
            frames: FrameScheduler::new(),
            groups: Vec::new(),
        }
    }

    /// Parse markup into a new page. Nothing is mounted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup cannot be parsed.
    pub fn parse(html: &str) -> Result<Self, TabGroupError> {
        Ok(Self::new(HtmlParser::new().parse(html)?))
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Connected host elements, in document order.
    ///
    /// Hosts inside `<template>` elements are inert and not listed.
    #[must_use]
    pub fn hosts(&self) -> Vec<NodeId> {
        let doc = &self.document;
        doc.elements_by_tag(doc.root(), HOST_TAG)
            .into_iter()
            .filter(|&host| !doc.ancestors(host).into_iter().any(|a| doc.is_tag(a, "template")))
            .collect()
    }

    /// Write `defaults` onto every host that lacks the attributes.
    pub fn apply_defaults(&mut self, defaults: &HostDefaults) {
        for host in self.hosts() {
            for (name, value) in defaults.missing_attributes(&self.document, host) {
                self.set_attribute(host, name, &value);
            }
        }
    }

    /// Mount every host on the page.
    ///
    /// # Errors
    ///
    /// Stops at the first host whose content cannot be transformed. Hosts
    /// mounted before it stay mounted.
    pub fn mount_all(&mut self) -> Result<usize, TabGroupError> {
        let hosts = self.hosts();
        for &host in &hosts {
            self.mount(host)?;
        }
        Ok(hosts.len())
    }

    /// Mount the group on `host`, creating it on first use.
    ///
    /// A group that is already mounted is only re-synchronized. A group whose
    /// transformation fails is not registered.
    ///
    /// # Errors
    ///
    /// Returns the transformation's structure error.
    pub fn mount(&mut self, host: NodeId) -> Result<(), TabGroupError> {
        if let Some(group) = self.groups.iter_mut().find(|g| g.host() == host) {
            return group.mount(&mut self.document, &mut self.ids);
        }
        let mut group = TabGroup::new(host);
        group.mount(&mut self.document, &mut self.ids)?;
        self.groups.push(group);
        Ok(())
    }

    /// Take a host out of the document, keeping its group for re-insertion.
    pub fn disconnect(&mut self, host: NodeId) {
        self.document.detach(host);
    }

    /// Put a host back under `parent` and re-enter its group.
    ///
    /// # Errors
    ///
    /// Returns [`TabGroupError::UnknownHost`] if no group was mounted on the
    /// host, or any error from mounting.
    pub fn connect(&mut self, parent: NodeId, host: NodeId) -> Result<(), TabGroupError> {
        if self.group(host).is_none() {
            return Err(TabGroupError::UnknownHost(host));
        }
        self.document.append_child(parent, host);
        self.mount(host)
    }

    /// Remove a host from the document and tear its group down.
    ///
    /// # Errors
    ///
    /// Returns [`TabGroupError::UnknownHost`] if no group is mounted on it.
    pub fn discard(&mut self, host: NodeId) -> Result<(), TabGroupError> {
        let position = self
            .groups
            .iter()
            .position(|g| g.host() == host)
            .ok_or(TabGroupError::UnknownHost(host))?;
        self.groups.remove(position);
        self.frames.cancel_group(host);
        self.document.detach(host);
        tracing::debug!(host = host.index(), "Discarded tab group");
        Ok(())
    }

    /// Set a host attribute, notifying the group if the attribute is observed.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let changed = self.document.set_attribute(node, name, value);
        self.attribute_changed(node, name);
        changed
    }

    /// Remove a host attribute, notifying the group if the attribute is observed.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        let removed = self.document.remove_attribute(node, name);
        self.attribute_changed(node, name);
        removed
    }

    fn attribute_changed(&mut self, node: NodeId, name: &str) {
        if !is_observed(name) {
            return;
        }
        if let Some(group) = self.groups.iter_mut().find(|g| g.host() == node) {
            group.configuration_changed(&mut self.document);
        }
    }

    /// Deliver an event to the group containing its target.
    ///
    /// # Errors
    ///
    /// Propagates structure errors from the group's handler.
    pub fn dispatch(&mut self, event: &UiEvent) -> Result<EventOutcome, TabGroupError> {
        let target = event.target();
        let doc = &self.document;
        let Some(group) = self
            .groups
            .iter_mut()
            .find(|g| doc.contains(g.host(), target))
        else {
            return Ok(EventOutcome::ignored());
        };
        group.handle_event(&mut self.document, &mut self.frames, event)
    }

    /// Click a node.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn click(&mut self, target: NodeId) -> Result<EventOutcome, TabGroupError> {
        self.dispatch(&UiEvent::Click { target })
    }

    /// Press a key while `target` has focus.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn key_down(
        &mut self,
        target: NodeId,
        event: KeyboardEvent,
    ) -> Result<EventOutcome, TabGroupError> {
        self.dispatch(&UiEvent::KeyDown { target, event })
    }

    /// Move focus to `target` the way a user would, then deliver the focus event.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn focus(&mut self, target: NodeId) -> Result<EventOutcome, TabGroupError> {
        if !self.document.focus(target, false) {
            return Ok(EventOutcome::ignored());
        }
        self.dispatch(&UiEvent::Focus { target })
    }

    /// Run the tasks due in the next frame. Returns how many ran.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn run_frame(&mut self) -> Result<usize, TabGroupError> {
        let tasks = self.frames.take_frame();
        let count = tasks.len();

        for task in tasks {
            match task {
                FrameTask::Focus {
                    group,
                    target,
                    ticket,
                } => {
                    if !self.document.focus(target, true) {
                        tracing::warn!(target = target.index(), "Skipping focus of detached tab");
                        continue;
                    }
                    self.frames.request(FrameTask::Scroll {
                        group,
                        target,
                        ticket,
                    });
                    self.dispatch(&UiEvent::Focus { target })?;
                }
                FrameTask::Scroll {
                    group,
                    target,
                    ticket,
                } => {
                    if !self.frames.is_current(group, ticket) {
                        tracing::trace!(target = target.index(), "Skipping superseded scroll");
                        continue;
                    }
                    if !self.document.is_connected(target) {
                        tracing::warn!(target = target.index(), "Skipping scroll of detached tab");
                        continue;
                    }
                    self.document
                        .scroll_into_view(target, ScrollBehavior::Smooth, ScrollAlign::Start);
                }
            }
        }

        Ok(count)
    }

    /// Run frames until no task is pending. Returns how many frames ran.
    ///
    /// # Errors
    ///
    /// See [`Page::dispatch`].
    pub fn run_until_idle(&mut self) -> Result<usize, TabGroupError> {
        let mut frames = 0;
        while !self.frames.is_idle() {
            self.run_frame()?;
            frames += 1;
        }
        Ok(frames)
    }

    /// Number of frame tasks waiting.
    #[must_use]
    pub fn pending_frame_tasks(&self) -> usize {
        self.frames.pending()
    }

    /// Group mounted on `host`.
    #[must_use]
    pub fn group(&self, host: NodeId) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.host() == host)
    }

    /// Mounted groups in mount order.
    #[must_use]
    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    /// Serialize the whole document.
    #[must_use]
    pub fn to_html(&self, options: SerializeOptions) -> String {
        HtmlSerializer::new(options).serialize_children(&self.document, self.document.root())
    }
}
