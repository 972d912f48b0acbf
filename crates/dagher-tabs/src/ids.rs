//! Identifier allocation for tab/panel pairs.

use std::fmt;

/// Identifier shared by a tab and its panel.
///
/// Renders as `tab-{n}` on the tab and `panel-{n}` on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PairId(u64);

impl PairId {
    /// Numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Element ID of the tab.
    #[must_use]
    pub fn tab_id(self) -> String {
        format!("tab-{}", self.0)
    }

    /// Element ID of the panel.
    #[must_use]
    pub fn panel_id(self) -> String {
        format!("panel-{}", self.0)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out unique, increasing pair identifiers starting at 1.
///
/// One allocator serves every tab group of a page, so identifiers never
/// collide between groups and are never reused.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator whose first identifier is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Take the next identifier.
    pub fn allocate(&mut self) -> PairId {
        let id = PairId(self.next);
        self.next += 1;
        id
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
