//! `dagher replay` command implementation.
//!
//! An event script is a comma-separated list of steps applied to the first
//! tab group of the page:
//!
//! - `click:N` clicks control `N` (zero-based)
//! - `focus:N` moves focus to control `N`
//! - `key:NAME` or `key:NAME+meta` presses a key on the focused control, or on
//!   the selected one when focus is elsewhere
//! - `frame` runs one animation frame
//! - `attr:NAME=VALUE` sets a host attribute
//! - `unattr:NAME` removes a host attribute

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use dagher_config::Config;
use dagher_dom::{Key, KeyboardEvent, NodeId};
use dagher_tabs::{ActivationModel, Page, TabGroupSnapshot, Variant};

use crate::error::CliError;

/// Arguments for the replay command.
#[derive(Args)]
pub(crate) struct ReplayArgs {
    /// HTML file containing at least one `dagher-tab-group`.
    file: PathBuf,

    /// Steps to replay, e.g. "click:1,key:ArrowRight,frame,frame".
    #[arg(short, long)]
    events: String,

    /// Print the final state as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover dagher.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show debug messages).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Error in an event script.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ScriptError {
    #[error("step {position} is empty")]
    EmptyStep { position: usize },

    #[error("unknown step \"{step}\"")]
    UnknownStep { step: String },

    #[error("step \"{step}\" needs a control index")]
    InvalidIndex { step: String },

    #[error("step \"{step}\" needs a value")]
    MissingValue { step: String },

    #[error("control {index} does not exist, the group has {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Click(usize),
    Focus(usize),
    Key(KeyboardEvent),
    Frame,
    SetAttribute { name: String, value: String },
    RemoveAttribute(String),
}

/// Parse a comma-separated event script.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .split(',')
        .enumerate()
        .map(|(position, raw)| parse_step(position + 1, raw.trim()))
        .collect()
}

fn parse_step(position: usize, step: &str) -> Result<Step, ScriptError> {
    if step.is_empty() {
        return Err(ScriptError::EmptyStep { position });
    }
    if step == "frame" {
        return Ok(Step::Frame);
    }

    let (kind, arg) = step.split_once(':').ok_or_else(|| ScriptError::UnknownStep {
        step: step.to_owned(),
    })?;
    let index = || {
        arg.parse::<usize>().map_err(|_| ScriptError::InvalidIndex {
            step: step.to_owned(),
        })
    };
    let missing = || ScriptError::MissingValue {
        step: step.to_owned(),
    };

    match kind {
        "click" => Ok(Step::Click(index()?)),
        "focus" => Ok(Step::Focus(index()?)),
        "key" => {
            let (name, meta) = match arg.strip_suffix("+meta") {
                Some(name) => (name, true),
                None => (arg, false),
            };
            if name.is_empty() {
                return Err(missing());
            }
            let key = Key::from_dom(name, name);
            Ok(Step::Key(if meta {
                KeyboardEvent::with_meta(key)
            } else {
                KeyboardEvent::new(key)
            }))
        }
        "attr" => {
            let (name, value) = arg.split_once('=').ok_or_else(missing)?;
            if name.is_empty() {
                return Err(missing());
            }
            Ok(Step::SetAttribute {
                name: name.to_owned(),
                value: value.to_owned(),
            })
        }
        "unattr" if !arg.is_empty() => Ok(Step::RemoveAttribute(arg.to_owned())),
        "unattr" => Err(missing()),
        _ => Err(ScriptError::UnknownStep {
            step: step.to_owned(),
        }),
    }
}

/// Apply `steps` to the first group of `page`.
fn replay(page: &mut Page, steps: &[Step]) -> Result<(), CliError> {
    let Some(group) = page.groups().first() else {
        return Err(CliError::Validation("no tab group found".to_owned()));
    };
    let host = group.host();

    for step in steps {
        tracing::debug!(?step, "Replaying step");
        match step {
            Step::Click(index) => {
                let target = control(page, host, *index)?;
                page.click(target)?;
            }
            Step::Focus(index) => {
                let target = control(page, host, *index)?;
                page.focus(target)?;
            }
            Step::Key(event) => {
                let target = key_target(page, host)?;
                page.key_down(target, event.clone())?;
            }
            Step::Frame => {
                page.run_frame()?;
            }
            Step::SetAttribute { name, value } => {
                page.set_attribute(host, name, value);
            }
            Step::RemoveAttribute(name) => {
                page.remove_attribute(host, name);
            }
        }
    }
    Ok(())
}

fn group_controls(page: &Page, host: NodeId) -> &[NodeId] {
    page.group(host).map_or(&[], |g| g.controls())
}

fn control(page: &Page, host: NodeId, index: usize) -> Result<NodeId, ScriptError> {
    let controls = group_controls(page, host);
    controls
        .get(index)
        .copied()
        .ok_or(ScriptError::IndexOutOfRange {
            index,
            len: controls.len(),
        })
}

/// The control a key press lands on: the focused one, else the selected one.
fn key_target(page: &Page, host: NodeId) -> Result<NodeId, ScriptError> {
    let controls = group_controls(page, host);
    if let Some(focused) = page.document().focused()
        && controls.contains(&focused)
    {
        return Ok(focused);
    }
    let selected = page.group(host).and_then(|g| g.selected_index()).unwrap_or(0);
    control(page, host, selected)
}

fn format_snapshot(snapshot: &TabGroupSnapshot) -> String {
    fn join<T: ToString>(values: &[T]) -> String {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
    let index = |value: Option<usize>| value.map_or_else(|| "-".to_owned(), |i| i.to_string());

    let variant = snapshot.variant.map_or("-", Variant::class_name);
    let activation = match snapshot.activation {
        ActivationModel::AutomaticOnFocus => "automatic",
        ActivationModel::Manual => "manual",
    };

    [
        format!("titles:     {}", snapshot.titles.join(" | ")),
        format!("selected:   {}", index(snapshot.selected)),
        format!("focused:    {}", index(snapshot.focused)),
        format!("tabindex:   {}", join(&snapshot.tab_indices)),
        format!("hidden:     {}", join(&snapshot.hidden)),
        format!("variant:    {variant}"),
        format!("label:      {}", snapshot.label.as_deref().unwrap_or("-")),
        format!("activation: {activation}"),
    ]
    .join("\n")
}

impl ReplayArgs {
    /// Execute the replay command.
    ///
    /// # Errors
    ///
    /// Returns an error if the script, the configuration or the markup is
    /// invalid, or if the page has no tab group.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let steps = parse_script(&self.events)?;
        let config = Config::load(self.config.as_deref(), None)?;
        let (mut page, _) = super::load_page(&self.file, &config)?;

        replay(&mut page, &steps)?;

        let group = page
            .groups()
            .first()
            .ok_or_else(|| CliError::Validation("no tab group found".to_owned()))?;
        let snapshot = group.snapshot(page.document());

        let rendered = if self.json {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            format_snapshot(&snapshot)
        };

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
        Ok(())
    }
}
