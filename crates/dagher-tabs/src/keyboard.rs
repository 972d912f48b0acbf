//! Keyboard navigation between tabs.
//!
//! | key                          | action                      |
//! |------------------------------|-----------------------------|
//! | `Tab`                        | left to the browser         |
//! | `Enter`, `Space`             | click the focused tab       |
//! | `Home`, meta + `ArrowLeft`   | focus the first tab         |
//! | `End`, meta + `ArrowRight`   | focus the last tab          |
//! | `ArrowRight`                 | focus the next tab, wrapping |
//! | `ArrowLeft`                  | focus the previous tab, wrapping |
//!
//! Every key except `Tab` has its default action prevented and does not
//! propagate, including keys with no action.

use dagher_dom::{Document, Key, KeyboardEvent, NodeId};

use crate::error::TabGroupError;

/// What a key press on a tab control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Not intercepted.
    PassThrough,
    /// Activate the control the key was pressed on.
    Activate,
    /// Move focus to the control at this index.
    MoveFocus(usize),
    /// Swallowed without further effect.
    Suppress,
}

/// Resolve a key press on control `index` out of `count` controls.
#[must_use]
pub fn resolve(event: &KeyboardEvent, index: usize, count: usize) -> KeyAction {
    if count == 0 {
        return match event.key {
            Key::Tab => KeyAction::PassThrough,
            _ => KeyAction::Suppress,
        };
    }
    let first = 0;
    let last = count - 1;

    match (&event.key, event.meta) {
        (Key::Tab, _) => KeyAction::PassThrough,
        (Key::Enter | Key::Space, _) => KeyAction::Activate,
        (Key::Home, _) | (Key::ArrowLeft, true) => KeyAction::MoveFocus(first),
        (Key::End, _) | (Key::ArrowRight, true) => KeyAction::MoveFocus(last),
        (Key::ArrowRight, false) => {
            KeyAction::MoveFocus(if index >= last { first } else { index + 1 })
        }
        (Key::ArrowLeft, false) => {
            KeyAction::MoveFocus(if index == first { last } else { (index - 1).min(last) })
        }
        (Key::Other(_), _) => KeyAction::Suppress,
    }
}

/// The tab list a control belongs to: its grandparent.
///
/// # Errors
///
/// Returns [`TabGroupError::BrokenStructure`] if the grandparent is missing or
/// lacks `role="tablist"`.
pub fn containing_tab_list(doc: &Document, control: NodeId) -> Result<NodeId, TabGroupError> {
    doc.parent(control)
        .and_then(|tab| doc.parent(tab))
        .filter(|&list| doc.role(list) == Some("tablist"))
        .ok_or(TabGroupError::BrokenStructure)
}

/// Buttons inside `role="tab"` elements of a tab list, in document order.
#[must_use]
pub fn tab_controls(doc: &Document, tab_list: NodeId) -> Vec<NodeId> {
    doc.query_all(tab_list, |d, node| {
        d.is_tag(node, "button")
            && d.ancestors(node)
                .into_iter()
                .take_while(|&a| a != tab_list)
                .any(|a| d.role(a) == Some("tab"))
    })
}

#[cfg(test)]
mod tests {
    use dagher_dom::HtmlParser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(key: Key) -> KeyboardEvent {
        KeyboardEvent::new(key)
    }

    #[test]
    fn test_tab_passes_through() {
        assert_eq!(resolve(&key(Key::Tab), 1, 3), KeyAction::PassThrough);
        assert_eq!(
            resolve(&KeyboardEvent::with_meta(Key::Tab), 1, 3),
            KeyAction::PassThrough
        );
    }

    #[test]
    fn test_confirm_keys_activate() {
        assert_eq!(resolve(&key(Key::Enter), 1, 3), KeyAction::Activate);
        assert_eq!(resolve(&key(Key::Space), 2, 3), KeyAction::Activate);
    }

    #[test]
    fn test_home_and_end() {
        assert_eq!(resolve(&key(Key::Home), 2, 3), KeyAction::MoveFocus(0));
        assert_eq!(resolve(&key(Key::End), 0, 3), KeyAction::MoveFocus(2));
    }

    #[test]
    fn test_meta_arrows_jump() {
        assert_eq!(
            resolve(&KeyboardEvent::with_meta(Key::ArrowLeft), 2, 4),
            KeyAction::MoveFocus(0)
        );
        assert_eq!(
            resolve(&KeyboardEvent::with_meta(Key::ArrowRight), 1, 4),
            KeyAction::MoveFocus(3)
        );
    }

    #[test]
    fn test_arrows_step_and_wrap() {
        assert_eq!(resolve(&key(Key::ArrowRight), 0, 3), KeyAction::MoveFocus(1));
        assert_eq!(resolve(&key(Key::ArrowRight), 2, 3), KeyAction::MoveFocus(0));
        assert_eq!(resolve(&key(Key::ArrowLeft), 2, 3), KeyAction::MoveFocus(1));
        assert_eq!(resolve(&key(Key::ArrowLeft), 0, 3), KeyAction::MoveFocus(2));
    }

    #[test]
    fn test_wrap_laws_for_every_size() {
        for n in 1..8 {
            assert_eq!(resolve(&key(Key::ArrowRight), n - 1, n), KeyAction::MoveFocus(0));
            assert_eq!(resolve(&key(Key::ArrowLeft), 0, n), KeyAction::MoveFocus(n - 1));
        }
    }

    #[test]
    fn test_single_tab_stays_put() {
        assert_eq!(resolve(&key(Key::ArrowRight), 0, 1), KeyAction::MoveFocus(0));
        assert_eq!(resolve(&key(Key::ArrowLeft), 0, 1), KeyAction::MoveFocus(0));
    }

    #[test]
    fn test_other_keys_are_suppressed() {
        assert_eq!(
            resolve(&key(Key::Other("a".to_owned())), 0, 3),
            KeyAction::Suppress
        );
    }

    #[test]
    fn test_containing_tab_list() {
        let doc = HtmlParser::new()
            .parse(r#"<ul role="tablist"><li role="tab"><button>A</button></li></ul><div><span><button>B</button></span></div>"#)
            .unwrap();
        let buttons = doc.elements_by_tag(doc.root(), "button");
        let list = doc.element_children(doc.root())[0];

        assert_eq!(containing_tab_list(&doc, buttons[0]).unwrap(), list);
        assert!(matches!(
            containing_tab_list(&doc, buttons[1]),
            Err(TabGroupError::BrokenStructure)
        ));
        assert_eq!(tab_controls(&doc, list), vec![buttons[0]]);
    }

    #[test]
    fn test_detached_control_is_broken() {
        let mut doc = dagher_dom::Document::new();
        let button = doc.create_element("button");
        assert!(matches!(
            containing_tab_list(&doc, button),
            Err(TabGroupError::BrokenStructure)
        ));
    }
}
