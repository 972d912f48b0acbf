//! Configuration management for Dagher.
//!
//! Parses `dagher.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `tab_group.title`
//! - `tab_group.variant`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the default variant.
    pub variant: Option<String>,
    /// Override the default activation model.
    pub manual_switching: Option<bool>,
    /// Override the default accessible name.
    pub title: Option<String>,
    /// Override pretty printing of output markup.
    pub pretty: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dagher.toml";

/// Variant values a configuration may name.
const KNOWN_VARIANTS: &[&str] = &["pill", "underline"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for tab group hosts.
    pub tab_group: TabGroupSection,
    /// Output formatting.
    pub output: OutputConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Attribute defaults for tab group hosts.
///
/// Each value applies only to hosts that do not carry the attribute.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TabGroupSection {
    /// Default `variant` attribute.
    pub variant: Option<String>,
    /// Default activation: `true` adds `with-manual-switching`.
    pub manual_switching: Option<bool>,
    /// Default `title` attribute.
    pub title: Option<String>,
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent serialized markup.
    pub pretty: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`tab_group.title`").
        field: String,
        /// Error message (e.g., "${`DOCS_TABS_LABEL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dagher.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value (including a CLI override) is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(variant) = &settings.variant {
            self.tab_group.variant = Some(variant.clone());
        }
        if let Some(manual) = settings.manual_switching {
            self.tab_group.manual_switching = Some(manual);
        }
        if let Some(title) = &settings.title {
            self.tab_group.title = Some(title.clone());
        }
        if let Some(pretty) = settings.pretty {
            self.output.pretty = pretty;
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(variant) = &self.tab_group.variant
            && !KNOWN_VARIANTS.contains(&variant.as_str())
        {
            return Err(ConfigError::Validation(format!(
                "tab_group.variant must be one of {}, got \"{variant}\"",
                KNOWN_VARIANTS.join(", ")
            )));
        }
        if let Some(title) = &self.tab_group.title {
            require_non_empty(title.trim(), "tab_group.title")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref title) = self.tab_group.title {
            self.tab_group.title = Some(expand::expand_env(title, "tab_group.title")?);
        }
        if let Some(ref variant) = self.tab_group.variant {
            self.tab_group.variant = Some(expand::expand_env(variant, "tab_group.variant")?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tab_group.variant, None);
        assert_eq!(config.tab_group.manual_switching, None);
        assert_eq!(config.tab_group.title, None);
        assert!(!config.output.pretty);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tab_group.variant, None);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[tab_group]
variant = "underline"
manual_switching = true
title = "Sections"

[output]
pretty = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tab_group.variant.as_deref(), Some("underline"));
        assert_eq!(config.tab_group.manual_switching, Some(true));
        assert_eq!(config.tab_group.title.as_deref(), Some("Sections"));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_unknown_variant_fails_validation() {
        let toml = r#"
[tab_group]
variant = "striped"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("striped"));
    }

    #[test]
    fn test_blank_title_fails_validation() {
        let toml = r#"
[tab_group]
title = "   "
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tab_group.title"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config: Config = toml::from_str(
            r#"
[tab_group]
variant = "underline"
title = "Sections"
"#,
        )
        .unwrap();
        config.apply_cli_settings(&CliSettings {
            variant: Some("pill".to_owned()),
            manual_switching: Some(true),
            pretty: Some(true),
            ..Default::default()
        });

        assert_eq!(config.tab_group.variant.as_deref(), Some("pill"));
        assert_eq!(config.tab_group.manual_switching, Some(true));
        assert_eq!(config.tab_group.title.as_deref(), Some("Sections")); // Unchanged
        assert!(config.output.pretty);
    }

    #[test]
    fn test_apply_empty_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.tab_group.variant, None);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_expand_env_vars_title() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DAGHER_TEST_TABS_LABEL", "Platforms");
        }

        let toml = r#"
[tab_group]
title = "${DAGHER_TEST_TABS_LABEL:-Sections}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.tab_group.title.as_deref(), Some("Platforms"));

        unsafe {
            std::env::remove_var("DAGHER_TEST_TABS_LABEL");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DAGHER_TEST_MISSING_VARIANT");
        }

        let toml = r#"
[tab_group]
variant = "${DAGHER_TEST_MISSING_VARIANT}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("tab_group.variant"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\npretty = true\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert!(config.output.pretty);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_rejects_invalid_cli_variant() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            variant: Some("zigzag".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[tab_group\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs").join("guides");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_prefers_nearest_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(nested.join(CONFIG_FILENAME))
        );
    }
}
