//! Accessible tab groups for Dagher pages.
//!
//! A `<dagher-tab-group>` host holding `<details>` blocks is rewritten into a
//! tab list and a set of panels carrying the ARIA tabs pattern. Afterwards the
//! group keeps one pair selected, follows the host's `title`, `variant` and
//! `with-manual-switching` attributes, and handles pointer and keyboard input.
//!
//! # Example
//!
//! ```
//! use dagher_dom::{Key, KeyboardEvent};
//! use dagher_tabs::Page;
//!
//! let mut page = Page::parse(
//!     "<dagher-tab-group title=\"Install\">\
//!        <details><summary>macOS</summary>brew install dagher</details>\
//!        <details><summary>Linux</summary>apt install dagher</details>\
//!      </dagher-tab-group>",
//! )
//! .unwrap();
//! page.mount_all().unwrap();
//!
//! let first = page.groups()[0].controls()[0];
//! page.key_down(first, KeyboardEvent::new(Key::ArrowRight)).unwrap();
//! page.run_until_idle().unwrap();
//!
//! // Selection follows focus by default.
//! assert_eq!(page.groups()[0].selected_index(), Some(1));
//! ```

mod config;
mod error;
mod frames;
mod group;
mod ids;
mod keyboard;
mod page;
mod snapshot;
mod state;
mod sync;
mod transform;

pub use config::{
    ActivationModel, HostDefaults, MANUAL_SWITCHING_ATTRIBUTE, OBSERVED_ATTRIBUTES,
    TITLE_ATTRIBUTE, TabGroupConfig, VARIANT_ATTRIBUTE, Variant, is_observed,
};
pub use error::TabGroupError;
pub use frames::{FrameScheduler, FrameTask, Ticket};
pub use group::TabGroup;
pub use ids::{IdAllocator, PairId};
pub use keyboard::{KeyAction, resolve as resolve_key};
pub use page::{HOST_TAG, Page};
pub use snapshot::TabGroupSnapshot;
pub use state::SelectionState;
pub use transform::STRUCTURE_TEMPLATE_ID;
