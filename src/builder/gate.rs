//! Making sure the build directory is configured before any action runs.

use std::path::Path;

use crate::builder::tools::ResolvedTool;
use crate::core::RunError;
use crate::util::config::Config;
use crate::util::process::{run_checked, ProcessBuilder, ProcessExecutor};

/// File Meson writes into a configured build directory.
pub const BUILD_MANIFEST: &str = "build.ninja";

/// Setup flag enabling coverage instrumentation.
pub const COVERAGE_FLAG: &str = "-Db_coverage=true";

/// What the gate had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    AlreadyConfigured,
    SetUp,
}

/// Check whether a directory holds a generated build manifest.
pub fn is_configured(directory: &Path) -> bool {
    directory.is_dir() && directory.join(BUILD_MANIFEST).is_file()
}

/// Runs `meson setup` when the build directory is not configured yet.
pub struct BuildGate<'a> {
    exec: &'a dyn ProcessExecutor,
    config: &'a Config,
}

impl<'a> BuildGate<'a> {
    pub fn new(exec: &'a dyn ProcessExecutor, config: &'a Config) -> Self {
        BuildGate { exec, config }
    }

    /// Build the `meson setup` invocation for this run.
    pub fn setup_command(&self, meson: &ResolvedTool) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&meson.path)
            .arg("setup")
            .arg(&self.config.directory);

        if self.config.action.spec().coverage_setup {
            cmd = cmd.arg(COVERAGE_FLAG);
        }

        if let Some(ref setup_options) = self.config.setup_options {
            cmd = cmd.arg(setup_options);
        }

        cmd
    }

    /// Configure the build directory if needed, then verify the manifest exists.
    pub fn ensure_configured(&self, meson: &ResolvedTool) -> Result<GateOutcome, RunError> {
        let directory = &self.config.directory;

        let outcome = if is_configured(directory) {
            tracing::debug!("{} is already configured", directory.display());
            GateOutcome::AlreadyConfigured
        } else {
            tracing::info!("Project isn't setup yet. Setting it up.");
            let cmd = self.setup_command(meson);
            tracing::debug!("Running Meson setup: {}", cmd.display_command());
            run_checked(self.exec, &cmd)?;
            GateOutcome::SetUp
        };

        if !directory.join(BUILD_MANIFEST).is_file() {
            return Err(RunError::SetupFailed {
                directory: directory.clone(),
            });
        }

        Ok(outcome)
    }
}
