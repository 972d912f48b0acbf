//! CLI error types.

use dagher_config::ConfigError;
use dagher_tabs::TabGroupError;

use crate::commands::ScriptError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    TabGroup(#[from] TabGroupError),

    #[error("invalid event script: {0}")]
    Script(#[from] ScriptError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
