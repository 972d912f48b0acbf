//! Observable state of a tab group, read back from the document.

use dagher_dom::{Document, EventKind};

use crate::config::{ActivationModel, Variant};
use crate::group::TabGroup;

/// What assistive technology and stylesheets see of a tab group.
///
/// Values are read from the rendered attributes rather than from the
/// group's internal state, so a snapshot reflects what the markup says.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TabGroupSnapshot {
    /// Pair identifiers.
    pub pair_ids: Vec<u64>,
    /// Tab titles.
    pub titles: Vec<String>,
    /// Selected pair according to the group.
    pub selected: Option<usize>,
    /// Index of the control holding keyboard focus, if any.
    pub focused: Option<usize>,
    /// `aria-selected` of every tab.
    pub aria_selected: Vec<bool>,
    /// `tabindex` of every control.
    pub tab_indices: Vec<i32>,
    /// `hidden` of every panel.
    pub hidden: Vec<bool>,
    /// Variant as applied to the tab list classes.
    pub variant: Option<Variant>,
    /// `aria-label` of the tab list.
    pub label: Option<String>,
    /// Activation model in effect.
    pub activation: ActivationModel,
    /// Controls with a focus listener registered.
    pub focus_listeners: usize,
}

impl TabGroupSnapshot {
    pub(crate) fn capture(group: &TabGroup, doc: &Document) -> Self {
        let controls = group.controls();
        let list = group.tab_list();

        let variants: Vec<Variant> = list
            .map(|list| {
                Variant::ALL
                    .into_iter()
                    .filter(|v| doc.has_class(list, v.class_name()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            pair_ids: group.pair_ids().iter().map(|id| id.get()).collect(),
            titles: group.titles().to_vec(),
            selected: group.selected_index(),
            focused: doc
                .focused()
                .and_then(|node| controls.iter().position(|&c| c == node)),
            aria_selected: group
                .tabs()
                .iter()
                .map(|&tab| doc.attribute(tab, "aria-selected") == Some("true"))
                .collect(),
            tab_indices: controls
                .iter()
                .map(|&c| {
                    doc.attribute(c, "tabindex")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0)
                })
                .collect(),
            hidden: group
                .panels()
                .iter()
                .map(|&p| doc.has_attribute(p, "hidden"))
                .collect(),
            variant: match variants.as_slice() {
                [only] => Some(*only),
                _ => None,
            },
            label: list.and_then(|l| doc.attribute(l, "aria-label").map(str::to_owned)),
            activation: group.activation_model(),
            focus_listeners: controls
                .iter()
                .filter(|&&c| doc.has_event_listener(c, EventKind::Focus))
                .count(),
        }
    }

    /// Whether exactly one tab is selected and it is the only focusable one.
    #[must_use]
    pub fn has_single_selection(&self) -> bool {
        let selected: Vec<usize> = positions(&self.aria_selected);
        let focusable: Vec<usize> = self
            .tab_indices
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| (t == 0).then_some(i))
            .collect();
        selected.len() == 1 && focusable == selected && self.selected == selected.first().copied()
    }

    /// Whether exactly the unselected panels are hidden.
    #[must_use]
    pub fn hidden_complements_selection(&self) -> bool {
        self.hidden
            .iter()
            .enumerate()
            .all(|(i, &hidden)| hidden == (Some(i) != self.selected))
    }
}

fn positions(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &on)| on.then_some(i))
        .collect()
}
