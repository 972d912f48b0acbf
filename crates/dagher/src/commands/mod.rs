//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod replay;

use std::path::Path;

use dagher_config::Config;
use dagher_tabs::{HostDefaults, Page};

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use replay::{ReplayArgs, ScriptError};

/// Host attribute defaults described by the configuration.
fn host_defaults(config: &Config) -> HostDefaults {
    HostDefaults {
        title: config.tab_group.title.clone(),
        variant: config.tab_group.variant.clone(),
        manual_switching: config.tab_group.manual_switching,
    }
}

/// Read `file`, apply configured defaults and mount every tab group.
///
/// Returns the page and the number of mounted groups.
fn load_page(file: &Path, config: &Config) -> Result<(Page, usize), CliError> {
    let html = std::fs::read_to_string(file)?;
    let mut page = Page::parse(&html)?;
    page.apply_defaults(&host_defaults(config));
    let mounted = page.mount_all()?;
    tracing::debug!(file = %file.display(), mounted, "Mounted tab groups");
    Ok((page, mounted))
}
