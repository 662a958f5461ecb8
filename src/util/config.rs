//! Run configuration.
//!
//! Inputs arrive from the CLI or from the `INPUT_*` environment variables a
//! workflow runner sets. An optional TOML defaults file can supply pinned
//! versions and options:
//!
//! ```toml
//! [versions]
//! ninja = "1.11.1.1"
//! meson = "1.4.1"
//! gcovr = "7.2"
//!
//! [options]
//! setup = "--buildtype=release"
//! run = "--verbose"
//! ```
//!
//! Precedence (highest to lowest): explicit input, defaults file, built-in pin.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Action, RunError};

/// Built-in Ninja pin.
pub const DEFAULT_NINJA_VERSION: &str = "1.11.1.1";

/// Built-in Meson pin.
pub const DEFAULT_MESON_VERSION: &str = "1.4.1";

/// Built-in gcovr pin.
pub const DEFAULT_GCOVR_VERSION: &str = "7.2";

/// Validated run parameters. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub action: Action,
    pub directory: PathBuf,
    pub setup_options: Option<String>,
    pub options: Option<String>,
    pub ninja_version: String,
    pub meson_version: String,
    pub gcovr_version: String,
    /// Installation prefix of a pre-provisioned Python, if any
    pub python_location: Option<PathBuf>,
}

/// Unvalidated inputs as they come from the environment.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub action: Option<String>,
    pub directory: Option<String>,
    pub setup_options: Option<String>,
    pub options: Option<String>,
    pub ninja_version: Option<String>,
    pub meson_version: Option<String>,
    pub gcovr_version: Option<String>,
    pub python_location: Option<String>,
}

impl RawInputs {
    /// Fill inputs left unset or empty from a defaults file.
    ///
    /// A workflow runner exports every declared input, so an input it has no
    /// value for arrives as an empty string rather than being absent.
    pub fn with_defaults(mut self, file: &ConfigFile) -> Self {
        fn fill(slot: &mut Option<String>, value: &Option<String>) {
            if value.is_some() && slot.as_deref().map_or(true, str::is_empty) {
                slot.clone_from(value);
            }
        }

        fill(&mut self.ninja_version, &file.versions.ninja);
        fill(&mut self.meson_version, &file.versions.meson);
        fill(&mut self.gcovr_version, &file.versions.gcovr);
        fill(&mut self.setup_options, &file.options.setup);
        fill(&mut self.options, &file.options.run);
        self
    }

    /// Parse the action input alone.
    pub fn action(&self) -> Result<Action, RunError> {
        let action_input = self.action.as_deref().unwrap_or_default();
        tracing::debug!("Processing action argument: {}", action_input);
        action_input.trim().parse()
    }

    /// Validate into a [`Config`].
    ///
    /// The action is checked first so an unknown action is reported before
    /// anything else.
    pub fn validate(self) -> Result<Config, RunError> {
        let action = self.action()?;

        let directory = self.directory.unwrap_or_default();
        tracing::debug!("Processing directory argument: {}", directory);
        if directory.is_empty() {
            return Err(RunError::InvalidConfig {
                field: "directory",
                message: "Meson must build to a directory".to_string(),
            });
        }

        let setup_options = non_empty(self.setup_options);
        tracing::debug!("Processing setup options argument: {:?}", setup_options);

        let options = non_empty(self.options);
        tracing::debug!("Processing options argument: {:?}", options);

        let ninja_version = pinned("ninja-version", self.ninja_version, DEFAULT_NINJA_VERSION)?;
        let meson_version = pinned("meson-version", self.meson_version, DEFAULT_MESON_VERSION)?;
        let gcovr_version = pinned("gcovr-version", self.gcovr_version, DEFAULT_GCOVR_VERSION)?;

        Ok(Config {
            action,
            directory: PathBuf::from(directory),
            setup_options,
            options,
            ninja_version,
            meson_version,
            gcovr_version,
            python_location: non_empty(self.python_location).map(PathBuf::from),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn pinned(field: &'static str, value: Option<String>, default: &str) -> Result<String, RunError> {
    let version = value.unwrap_or_else(|| default.to_string());
    tracing::debug!("Processing {} argument: {}", field, version);

    if version.trim().is_empty() {
        return Err(RunError::InvalidConfig {
            field,
            message: "no version specified".to_string(),
        });
    }

    Ok(version)
}

/// Optional defaults file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub versions: VersionsConfig,
    pub options: OptionsConfig,
}

/// Pinned tool versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionsConfig {
    pub ninja: Option<String>,
    pub meson: Option<String>,
    pub gcovr: Option<String>,
}

/// Raw option strings forwarded to Meson and the action command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    pub setup: Option<String>,
    pub run: Option<String>,
}

impl ConfigFile {
    /// Load a defaults file.
    pub fn load(path: &Path) -> Result<Self, RunError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RunError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| RunError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
