//! Turning the requested action into the one command that carries it out.

use crate::builder::{BuildGate, ResolvedTool, Tool, ToolResolver};
use crate::core::{Program, RunError};
use crate::util::config::Config;
use crate::util::process::{run_checked, ProcessBuilder, ProcessExecutor};

/// Runs an action end to end: tools, build gate, final command.
pub struct ActionDispatcher<'a> {
    exec: &'a dyn ProcessExecutor,
    config: &'a Config,
    tools: ToolResolver<'a>,
}

impl<'a> ActionDispatcher<'a> {
    pub fn new(exec: &'a dyn ProcessExecutor, config: &'a Config) -> Self {
        ActionDispatcher {
            exec,
            config,
            tools: ToolResolver::new(exec, config),
        }
    }

    /// Resolve every tool, configure the build directory, and build the
    /// final command without running it.
    ///
    /// Ninja and Meson are resolved first for every action; a tool needed by
    /// one action only is resolved after the build gate.
    pub fn prepare(&self) -> Result<ProcessBuilder, RunError> {
        let spec = self.config.action.spec();

        let ninja = self.tools.resolve(Tool::Ninja)?;
        let meson = self.tools.resolve(Tool::Meson)?;

        BuildGate::new(self.exec, self.config).ensure_configured(&meson)?;

        let program: ResolvedTool = match spec.program {
            Program::Base(Tool::Ninja) => ninja,
            Program::Base(Tool::Meson) => meson,
            Program::Base(tool) | Program::Extra(tool) => self.tools.resolve(tool)?,
        };

        tracing::debug!("Building arguments array");
        let mut cmd =
            ProcessBuilder::new(&program.path).args(spec.expand_args(&self.config.directory));

        if let Some(ref options) = self.config.options {
            cmd = cmd.arg(options);
        }

        Ok(cmd)
    }

    /// Carry out the action. Exactly one action command is spawned on success.
    pub fn dispatch(&self) -> Result<ProcessBuilder, RunError> {
        let cmd = self.prepare()?;

        tracing::info!("Running {}: {}", self.config.action, cmd.display_command());
        run_checked(self.exec, &cmd)?;

        Ok(cmd)
    }
}
