//! CLI definitions using clap.
//!
//! Every input can also come from the environment variable a workflow
//! runner sets for an action input of the same name.

use std::path::PathBuf;

use clap::Parser;
use meson_action::RawInputs;

/// Run one Meson action, installing Meson, Ninja and gcovr on demand
#[derive(Parser)]
#[command(name = "meson-action")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Action to run: build, install, test, coverage or tidy
    #[arg(long, env = "INPUT_ACTION")]
    pub action: Option<String>,

    /// Build directory
    #[arg(long, env = "INPUT_DIRECTORY")]
    pub directory: Option<String>,

    /// Extra argument passed to `meson setup`
    #[arg(long, env = "INPUT_SETUP-OPTIONS", allow_hyphen_values = true)]
    pub setup_options: Option<String>,

    /// Extra argument passed to the action command
    #[arg(long, env = "INPUT_OPTIONS", allow_hyphen_values = true)]
    pub options: Option<String>,

    /// Ninja version to install if Ninja is missing
    #[arg(long, env = "INPUT_NINJA-VERSION")]
    pub ninja_version: Option<String>,

    /// Meson version to install if Meson is missing
    #[arg(long, env = "INPUT_MESON-VERSION")]
    pub meson_version: Option<String>,

    /// gcovr version to install if gcovr is missing
    #[arg(long, env = "INPUT_GCOVR-VERSION")]
    pub gcovr_version: Option<String>,

    /// Installation prefix of the Python used for installs
    #[arg(long, env = "pythonLocation")]
    pub python_location: Option<String>,

    /// TOML file with default versions and options
    #[arg(long, env = "MESON_ACTION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit workflow commands for failures
    #[arg(long, env = "GITHUB_ACTIONS", hide = true)]
    pub github_actions: bool,
}

impl Cli {
    /// Collect the run inputs.
    pub fn inputs(&self) -> RawInputs {
        RawInputs {
            action: self.action.clone(),
            directory: self.directory.clone(),
            setup_options: self.setup_options.clone(),
            options: self.options.clone(),
            ninja_version: self.ninja_version.clone(),
            meson_version: self.meson_version.clone(),
            gcovr_version: self.gcovr_version.clone(),
            python_location: self.python_location.clone(),
        }
    }
}
