//! Selection state of a tab group.

/// Which pair is selected, and whether the structure has been built.
///
/// Before [`mount`](Self::mount) nothing is selected. Afterwards exactly one
/// index is selected for as long as the group has at least one pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
    len: usize,
    mounted: bool,
}

impl SelectionState {
    /// Unmounted state with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `len` pairs were built and select the first one.
    ///
    /// Has no effect if already mounted.
    pub fn mount(&mut self, len: usize) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.len = len;
        self.selected = (len > 0).then_some(0);
    }

    /// Whether the structure has been built.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the group has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selected index, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether `index` is the selected pair.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Select `index`. Returns `true` if the selection changed.
    ///
    /// Out-of-range indices and calls before mounting are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.mounted || index >= self.len || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }
}
