//! Projection of selection and configuration onto the generated markup.

use dagher_dom::{Document, EventKind};

use crate::config::{ActivationModel, TabGroupConfig, Variant};
use crate::state::SelectionState;
use crate::transform::Structure;

/// Align the markup with the current state.
///
/// Does nothing until the structure exists. Only attributes whose value
/// differs are written, so a repeated call with the same inputs leaves the
/// document's mutation count unchanged.
pub(crate) fn synchronize(
    doc: &mut Document,
    structure: Option<&Structure>,
    state: &SelectionState,
    config: &TabGroupConfig,
) {
    let Some(structure) = structure else {
        return;
    };
    let before = doc.mutation_count();

    let list = structure.tab_list;
    for variant in Variant::ALL {
        doc.toggle_class(list, variant.class_name(), variant == config.variant);
    }
    match &config.label {
        Some(label) => doc.set_attribute(list, "aria-label", label),
        None => doc.remove_attribute(list, "aria-label"),
    };

    for (index, ((&tab, &control), &panel)) in structure
        .tabs
        .iter()
        .zip(&structure.controls)
        .zip(&structure.panels)
        .enumerate()
    {
        let selected = state.is_selected(index);
        doc.set_attribute(tab, "aria-selected", if selected { "true" } else { "false" });
        doc.set_attribute(control, "tabindex", if selected { "0" } else { "-1" });
        doc.set_flag(panel, "hidden", !selected);
    }

    let follows_focus = config.activation == ActivationModel::AutomaticOnFocus;
    for &control in &structure.controls {
        if follows_focus {
            doc.add_event_listener(control, EventKind::Focus);
        } else {
            doc.remove_event_listener(control, EventKind::Focus);
        }
    }

    tracing::trace!(
        selected = ?state.selected(),
        mutations = doc.mutation_count() - before,
        "Synchronized tab group"
    );
}
