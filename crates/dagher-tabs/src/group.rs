//! The tab group widget.

use dagher_dom::{Document, EventKind, EventOutcome, Key, KeyboardEvent, NodeId, UiEvent};

use crate::config::{ActivationModel, TabGroupConfig, Variant};
use crate::error::TabGroupError;
use crate::frames::FrameScheduler;
use crate::ids::{IdAllocator, PairId};
use crate::keyboard::{self, KeyAction};
use crate::snapshot::TabGroupSnapshot;
use crate::state::SelectionState;
use crate::sync::synchronize;
use crate::transform::{Structure, transform};

/// One tab group mounted on a host element.
///
/// All selection changes go through [`TabGroup::handle_event`]; every change
/// of state or configuration ends with a synchronization of the markup.
#[derive(Debug)]
pub struct TabGroup {
    host: NodeId,
    state: SelectionState,
    config: TabGroupConfig,
    structure: Option<Structure>,
}

impl TabGroup {
    /// Create an unmounted group for `host`.
    #[must_use]
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            state: SelectionState::new(),
            config: TabGroupConfig::default(),
            structure: None,
        }
    }

    /// Host element.
    #[must_use]
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// Build the tab structure the first time; re-synchronize afterwards.
    ///
    /// Call whenever the host enters the document. Only the first successful
    /// call transforms the content; later calls keep the selection and any
    /// focus inside the group.
    ///
    /// # Errors
    ///
    /// Returns a structure error if a block has no title or the structure
    /// template has no tab list. The host is left untouched in that case.
    pub fn mount(&mut self, doc: &mut Document, ids: &mut IdAllocator) -> Result<(), TabGroupError> {
        if self.state.is_mounted() {
            tracing::debug!(host = self.host.index(), "Tab group re-entered, synchronizing only");
            self.synchronize(doc);
            return Ok(());
        }

        self.config = TabGroupConfig::from_host(doc, self.host);
        let structure = transform(doc, self.host, ids)?;
        for &control in &structure.controls {
            doc.add_event_listener(control, EventKind::Click);
            doc.add_event_listener(control, EventKind::KeyDown);
        }
        self.state.mount(structure.len());
        self.structure = Some(structure);

        tracing::debug!(
            host = self.host.index(),
            tabs = self.state.len(),
            variant = self.config.variant.class_name(),
            activation = ?self.config.activation,
            "Mounted tab group"
        );

        self.synchronize(doc);
        Ok(())
    }

    /// Re-read the host attributes and re-synchronize.
    pub fn configuration_changed(&mut self, doc: &mut Document) {
        let config = TabGroupConfig::from_host(doc, self.host);
        if config.activation != self.config.activation {
            tracing::debug!(
                host = self.host.index(),
                from = ?self.config.activation,
                to = ?config.activation,
                "Switching activation model"
            );
        }
        self.config = config;
        self.synchronize(doc);
    }

    /// Align the markup with the current state and configuration.
    pub fn synchronize(&self, doc: &mut Document) {
        synchronize(doc, self.structure.as_ref(), &self.state, &self.config);
    }

    /// Handle an event targeted at one of this group's controls.
    ///
    /// Events for other nodes, or for a control without a listener of the
    /// event's kind, are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TabGroupError::BrokenStructure`] if a key press arrives from a
    /// control that is no longer inside a tab list.
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        frames: &mut FrameScheduler,
        event: &UiEvent,
    ) -> Result<EventOutcome, TabGroupError> {
        let target = event.target();
        let Some(index) = self.control_index(target) else {
            return Ok(EventOutcome::ignored());
        };
        if !doc.has_event_listener(target, event.kind()) {
            return Ok(EventOutcome::ignored());
        }

        match event {
            UiEvent::Click { .. } | UiEvent::Focus { .. } => {
                self.activate(doc, index);
                Ok(EventOutcome::ignored())
            }
            UiEvent::KeyDown { event, .. } => self.key_down(doc, frames, target, index, event),
        }
    }

    fn key_down(
        &mut self,
        doc: &mut Document,
        frames: &mut FrameScheduler,
        target: NodeId,
        index: usize,
        event: &KeyboardEvent,
    ) -> Result<EventOutcome, TabGroupError> {
        if event.key == Key::Tab {
            return Ok(EventOutcome::ignored());
        }

        let tab_list = keyboard::containing_tab_list(doc, target)?;
        let controls = keyboard::tab_controls(doc, tab_list);
        let action = keyboard::resolve(event, index, controls.len());
        tracing::trace!(host = self.host.index(), index, ?event, ?action, "Tab key down");

        match action {
            KeyAction::Activate => {
                self.handle_event(doc, frames, &UiEvent::Click { target })?;
            }
            KeyAction::MoveFocus(next) => {
                if let Some(&control) = controls.get(next) {
                    frames.focus_and_scroll(self.host, control);
                }
            }
            KeyAction::PassThrough | KeyAction::Suppress => {}
        }

        Ok(EventOutcome::consumed())
    }

    /// Make `index` the selected pair and re-synchronize.
    fn activate(&mut self, doc: &mut Document, index: usize) {
        let previous = self.state.selected();
        if self.state.select(index) {
            tracing::debug!(
                host = self.host.index(),
                from = ?previous,
                to = index,
                "Selected tab"
            );
        }
        self.synchronize(doc);
    }

    fn control_index(&self, node: NodeId) -> Option<usize> {
        self.structure
            .as_ref()?
            .controls
            .iter()
            .position(|&control| control == node)
    }

    /// Whether the structure has been built.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    /// Selected pair index.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the group has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Current activation model.
    #[must_use]
    pub fn activation_model(&self) -> ActivationModel {
        self.config.activation
    }

    /// Current variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// Current accessible name of the tab list.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    /// The tab list element, once mounted.
    #[must_use]
    pub fn tab_list(&self) -> Option<NodeId> {
        self.structure.as_ref().map(|s| s.tab_list)
    }

    /// Tab controls (buttons) in order.
    #[must_use]
    pub fn controls(&self) -> &[NodeId] {
        self.structure.as_ref().map_or(&[], |s| s.controls.as_slice())
    }

    /// `role="tab"` elements in order.
    #[must_use]
    pub fn tabs(&self) -> &[NodeId] {
        self.structure.as_ref().map_or(&[], |s| s.tabs.as_slice())
    }

    /// Panels in order.
    #[must_use]
    pub fn panels(&self) -> &[NodeId] {
        self.structure.as_ref().map_or(&[], |s| s.panels.as_slice())
    }

    /// Pair identifiers in order.
    #[must_use]
    pub fn pair_ids(&self) -> &[PairId] {
        self.structure.as_ref().map_or(&[], |s| s.ids.as_slice())
    }

    /// Tab titles in order.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        self.structure.as_ref().map_or(&[], |s| s.titles.as_slice())
    }

    /// Observable state of the group as currently rendered.
    #[must_use]
    pub fn snapshot(&self, doc: &Document) -> TabGroupSnapshot {
        TabGroupSnapshot::capture(self, doc)
    }
}

#[cfg(test)]
mod tests {
    use dagher_dom::HtmlParser;
    use pretty_assertions::assert_eq;

    use super::*;

    const THREE_TABS: &str = "<dagher-tab-group>\
        <details><summary>Alpha</summary>A</details>\
        <details><summary>Beta</summary>B</details>\
        <details><summary>Gamma</summary>C</details>\
        </dagher-tab-group>";

    struct Fixture {
        doc: Document,
        ids: IdAllocator,
        frames: FrameScheduler,
        group: TabGroup,
    }

    impl Fixture {
        fn mounted(html: &str) -> Self {
            let mut doc = HtmlParser::new().parse(html).unwrap();
            let host = doc.elements_by_tag(doc.root(), "dagher-tab-group")[0];
            let mut ids = IdAllocator::new();
            let mut group = TabGroup::new(host);
            group.mount(&mut doc, &mut ids).unwrap();
            Self {
                doc,
                ids,
                frames: FrameScheduler::new(),
                group,
            }
        }

        fn send(&mut self, event: UiEvent) -> EventOutcome {
            self.group
                .handle_event(&mut self.doc, &mut self.frames, &event)
                .unwrap()
        }

        fn key(&mut self, index: usize, key: Key) -> EventOutcome {
            let target = self.group.controls()[index];
            self.send(UiEvent::KeyDown {
                target,
                event: KeyboardEvent::new(key),
            })
        }

        fn tabindices(&self) -> Vec<&str> {
            self.group
                .controls()
                .iter()
                .map(|&c| self.doc.attribute(c, "tabindex").unwrap())
                .collect()
        }

        fn hidden(&self) -> Vec<bool> {
            self.group
                .panels()
                .iter()
                .map(|&p| self.doc.has_attribute(p, "hidden"))
                .collect()
        }
    }

    #[test]
    fn test_mount_selects_first_pair() {
        let fx = Fixture::mounted(THREE_TABS);
        assert_eq!(fx.group.selected_index(), Some(0));
        assert_eq!(fx.tabindices(), vec!["0", "-1", "-1"]);
        assert_eq!(fx.hidden(), vec![false, true, true]);
        assert_eq!(fx.group.titles(), ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_mount_twice_does_not_rebuild() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let controls = fx.group.controls().to_vec();
        let target = controls[2];
        fx.send(UiEvent::Click { target });

        fx.group.mount(&mut fx.doc, &mut fx.ids).unwrap();

        assert_eq!(fx.group.controls(), controls.as_slice());
        assert_eq!(fx.group.selected_index(), Some(2));
        assert_eq!(fx.ids.issued(), 3);
    }

    #[test]
    fn test_click_selects() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let target = fx.group.controls()[1];
        let outcome = fx.send(UiEvent::Click { target });

        assert_eq!(outcome, EventOutcome::ignored());
        assert_eq!(fx.group.selected_index(), Some(1));
        assert_eq!(fx.tabindices(), vec!["-1", "0", "-1"]);
        assert_eq!(fx.hidden(), vec![true, false, true]);
    }

    #[test]
    fn test_focus_selects_in_automatic_model() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let target = fx.group.controls()[2];
        fx.send(UiEvent::Focus { target });
        assert_eq!(fx.group.selected_index(), Some(2));
    }

    #[test]
    fn test_focus_does_not_select_in_manual_model() {
        let mut fx = Fixture::mounted(
            r"<dagher-tab-group with-manual-switching>
              <details><summary>Alpha</summary>A</details>
              <details><summary>Beta</summary>B</details>
              </dagher-tab-group>",
        );
        let target = fx.group.controls()[1];
        fx.send(UiEvent::Focus { target });
        assert_eq!(fx.group.selected_index(), Some(0));
        assert_eq!(fx.doc.listener_count(EventKind::Focus), 0);
    }

    #[test]
    fn test_switching_model_updates_focus_listeners() {
        let mut fx = Fixture::mounted(THREE_TABS);
        assert_eq!(fx.doc.listener_count(EventKind::Focus), 3);

        let host = fx.group.host();
        fx.doc.set_attribute(host, "with-manual-switching", "");
        fx.group.configuration_changed(&mut fx.doc);
        assert_eq!(fx.group.activation_model(), ActivationModel::Manual);
        assert_eq!(fx.doc.listener_count(EventKind::Focus), 0);
        assert_eq!(fx.doc.listener_count(EventKind::Click), 3);

        fx.doc.remove_attribute(host, "with-manual-switching");
        fx.group.configuration_changed(&mut fx.doc);
        assert_eq!(fx.doc.listener_count(EventKind::Focus), 3);
    }

    #[test]
    fn test_tab_key_is_not_intercepted() {
        let mut fx = Fixture::mounted(THREE_TABS);
        assert_eq!(fx.key(0, Key::Tab), EventOutcome::ignored());
        assert!(fx.frames.is_idle());
    }

    #[test]
    fn test_arrow_schedules_focus_on_neighbour() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let outcome = fx.key(0, Key::ArrowRight);

        assert_eq!(outcome, EventOutcome::consumed());
        let tasks = fx.frames.take_frame();
        assert_eq!(tasks.len(), 1);
        let crate::frames::FrameTask::Focus { target, .. } = tasks[0] else {
            panic!("expected a focus task, got {tasks:?}");
        };
        assert_eq!(target, fx.group.controls()[1]);
        // Navigation alone never selects.
        assert_eq!(fx.group.selected_index(), Some(0));
    }

    #[test]
    fn test_enter_activates_focused_control() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let outcome = fx.key(2, Key::Enter);
        assert_eq!(outcome, EventOutcome::consumed());
        assert_eq!(fx.group.selected_index(), Some(2));
        assert!(fx.frames.is_idle());
    }

    #[test]
    fn test_unhandled_key_is_still_consumed() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let outcome = fx.key(1, Key::Other("x".to_owned()));
        assert_eq!(outcome, EventOutcome::consumed());
        assert!(fx.frames.is_idle());
        assert_eq!(fx.group.selected_index(), Some(0));
    }

    #[test]
    fn test_key_from_corrupted_structure_fails() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let control = fx.group.controls()[1];
        let stray = fx.doc.create_element("div");
        let root = fx.doc.root();
        fx.doc.append_child(root, stray);
        fx.doc.append_child(stray, control);

        let err = fx
            .group
            .handle_event(
                &mut fx.doc,
                &mut fx.frames,
                &UiEvent::KeyDown {
                    target: control,
                    event: KeyboardEvent::new(Key::ArrowRight),
                },
            )
            .unwrap_err();
        assert!(matches!(err, TabGroupError::BrokenStructure));
    }

    #[test]
    fn test_events_for_foreign_nodes_are_ignored() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let other = fx.doc.create_element("button");
        assert_eq!(fx.send(UiEvent::Click { target: other }), EventOutcome::ignored());
        assert_eq!(fx.group.selected_index(), Some(0));
    }

    #[test]
    fn test_variant_and_label_follow_configuration() {
        let mut fx = Fixture::mounted(THREE_TABS);
        let list = fx.group.tab_list().unwrap();
        assert_eq!(fx.doc.classes(list), vec!["pill"]);
        assert!(!fx.doc.has_attribute(list, "aria-label"));

        let host = fx.group.host();
        fx.doc.set_attribute(host, "variant", "underline");
        fx.doc.set_attribute(host, "title", "Platforms");
        fx.group.configuration_changed(&mut fx.doc);

        assert_eq!(fx.doc.classes(list), vec!["underline"]);
        assert_eq!(fx.doc.attribute(list, "aria-label"), Some("Platforms"));
        assert_eq!(fx.group.label(), Some("Platforms"));
    }

    #[test]
    fn test_synchronize_is_idempotent() {
        let fx = Fixture::mounted(THREE_TABS);
        let mut doc = fx.doc;
        let before = doc.mutation_count();
        fx.group.synchronize(&mut doc);
        fx.group.synchronize(&mut doc);
        assert_eq!(doc.mutation_count(), before);
    }

    #[test]
    fn test_synchronize_before_mount_is_noop() {
        let mut doc = HtmlParser::new().parse(THREE_TABS).unwrap();
        let host = doc.elements_by_tag(doc.root(), "dagher-tab-group")[0];
        let group = TabGroup::new(host);
        let before = doc.mutation_count();
        group.synchronize(&mut doc);
        assert_eq!(doc.mutation_count(), before);
        assert_eq!(group.selected_index(), None);
    }
}
