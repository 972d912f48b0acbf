//! UI events delivered to document nodes.

use crate::document::NodeId;

/// Kind of listener a node can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// Primary activation (mouse click or synthetic click).
    Click,
    /// A key was pressed while the node had focus.
    KeyDown,
    /// The node received keyboard focus.
    Focus,
}

/// Logical key of a keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Space,
    Home,
    End,
    ArrowLeft,
    ArrowRight,
    /// Any key without special meaning to widgets.
    Other(String),
}

impl Key {
    /// Map a DOM `key` value (and physical `code`) to a [`Key`].
    ///
    /// The space bar is recognized either by its `key` (`" "`) or by its
    /// `code` (`"Space"`), since some layouts report a different `key`.
    #[must_use]
    pub fn from_dom(key: &str, code: &str) -> Self {
        match key {
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ if code == "Space" => Self::Space,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Key-down payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Logical key.
    pub key: Key,
    /// Whether the platform "jump" modifier (meta/command) was held.
    pub meta: bool,
}

impl KeyboardEvent {
    /// A key press without modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self { key, meta: false }
    }

    /// A key press with the jump modifier held.
    #[must_use]
    pub fn with_meta(key: Key) -> Self {
        Self { key, meta: true }
    }
}

/// An interaction targeted at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click { target: NodeId },
    KeyDown { target: NodeId, event: KeyboardEvent },
    Focus { target: NodeId },
}

impl UiEvent {
    /// Node the event is dispatched to.
    #[must_use]
    pub fn target(&self) -> NodeId {
        match self {
            Self::Click { target } | Self::KeyDown { target, .. } | Self::Focus { target } => {
                *target
            }
        }
    }

    /// Listener kind that receives the event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Focus { .. } => EventKind::Focus,
        }
    }
}

/// What a handler did with an event, as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The default action was suppressed.
    pub default_prevented: bool,
    /// The event must not bubble further.
    pub propagation_stopped: bool,
}

impl EventOutcome {
    /// The event was not intercepted.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    /// The event was consumed: default prevented and propagation stopped.
    #[must_use]
    pub fn consumed() -> Self {
        Self {
            default_prevented: true,
            propagation_stopped: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("ArrowRight", "ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom(" ", "Space"), Key::Space);
        assert_eq!(Key::from_dom("Unidentified", "Space"), Key::Space);
        assert_eq!(Key::from_dom("Tab", "Tab"), Key::Tab);
        assert_eq!(Key::from_dom("a", "KeyA"), Key::Other("a".to_owned()));
    }

    #[test]
    fn test_event_target_and_kind() {
        let mut doc = crate::Document::new();
        let node = doc.create_element("button");
        let event = UiEvent::KeyDown {
            target: node,
            event: KeyboardEvent::new(Key::Home),
        };
        assert_eq!(event.target(), node);
        assert_eq!(event.kind(), EventKind::KeyDown);
    }
}
