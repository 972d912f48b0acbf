//! Error types for tab groups.

use dagher_dom::{DomError, NodeId};

/// Error raised by tab group operations.
///
/// The structure variants are fatal for the operation that raised them: they
/// mean the declarative input or the generated markup does not have the shape
/// the widget relies on.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TabGroupError {
    /// A disclosure block has no `summary` to use as its title.
    #[error("tab {index} has no summary element to use as its title")]
    MissingTitle {
        /// Position of the offending block among the host's blocks.
        index: usize,
    },

    /// The structure template contains no `role="tablist"` element.
    #[error("structure template has no element with role=\"tablist\"")]
    MissingTabList,

    /// A tab control is no longer nested two levels below its tab list.
    #[error("broken tab structure, unable to proceed")]
    BrokenStructure,

    /// The node is not the host of a mounted tab group.
    #[error("node {} is not a tab group host", .0.index())]
    UnknownHost(NodeId),

    /// Markup could not be parsed.
    #[error(transparent)]
    Dom(#[from] DomError),
}
