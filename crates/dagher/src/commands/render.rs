//! `dagher render` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use dagher_config::{CliSettings, Config};
use dagher_dom::SerializeOptions;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// HTML file containing `dagher-tab-group` elements.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover dagher.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default variant for groups without one (overrides config).
    #[arg(long)]
    variant: Option<String>,

    /// Default accessible name for groups without one (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Make groups without the attribute use manual switching.
    #[arg(long)]
    manual: bool,

    /// Indent the printed markup.
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output (show debug messages).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the markup is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            variant: self.variant,
            manual_switching: self.manual.then_some(true),
            title: self.title,
            pretty: self.pretty.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.detail(&format!("Using {}", path.display()));
        }

        let (page, mounted) = super::load_page(&self.file, &config)?;
        let html = page.to_html(SerializeOptions {
            pretty: config.output.pretty,
        });

        let mut stdout = io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        if !html.ends_with('\n') {
            writeln!(stdout)?;
        }
        stdout.flush()?;

        output.success(&format!("Rendered {mounted} tab group(s)"));
        Ok(())
    }
}
