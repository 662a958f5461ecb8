//! Finding the external tools an action needs, installing them on demand.
//!
//! Resolution is a small state machine per tool:
//!
//! 1. Look the binary up on the search path. A hit is used as-is, whatever
//!    its version.
//! 2. On a miss, tools installable through pip are installed at their pinned
//!    version with the run's interpreter, then looked up again.
//! 3. Tools that must be provided by the environment fail straight away.
//!
//! Each tool gets at most one install attempt per run.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::builder::interpreter::InterpreterLocator;
use crate::core::RunError;
use crate::util::config::Config;
use crate::util::process::{run_checked, ProcessBuilder, ProcessExecutor};

/// An external tool the pipeline may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Ninja,
    Meson,
    Gcovr,
    ClangTidy,
}

/// How a missing tool can be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPolicy {
    /// `python -m pip install <package>==<pinned version>`
    Pip { package: &'static str },
    /// Must already be installed by the environment.
    Preinstalled,
}

impl Tool {
    /// Binary name looked up on the search path.
    pub fn binary(&self) -> &'static str {
        match self {
            Tool::Ninja => "ninja",
            Tool::Meson => "meson",
            Tool::Gcovr => "gcovr",
            Tool::ClangTidy => "clang-tidy",
        }
    }

    pub fn install_policy(&self) -> InstallPolicy {
        match self {
            Tool::Ninja => InstallPolicy::Pip { package: "ninja" },
            Tool::Meson => InstallPolicy::Pip { package: "meson" },
            Tool::Gcovr => InstallPolicy::Pip { package: "gcovr" },
            Tool::ClangTidy => InstallPolicy::Preinstalled,
        }
    }

    /// Version to install when the tool is missing.
    pub fn pinned_version<'c>(&self, config: &'c Config) -> Option<&'c str> {
        match self {
            Tool::Ninja => Some(config.ninja_version.as_str()),
            Tool::Meson => Some(config.meson_version.as_str()),
            Tool::Gcovr => Some(config.gcovr_version.as_str()),
            Tool::ClangTidy => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// A located binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTool {
    pub name: String,
    pub path: PathBuf,
}

impl ResolvedTool {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ResolvedTool {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Outcome of one lookup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedTool),
    NeedsInstall,
    Unavailable,
}

/// Resolves tools for one run.
pub struct ToolResolver<'a> {
    exec: &'a dyn ProcessExecutor,
    config: &'a Config,
    interpreter: InterpreterLocator<'a>,
    attempted: RefCell<HashSet<Tool>>,
}

impl<'a> ToolResolver<'a> {
    pub fn new(exec: &'a dyn ProcessExecutor, config: &'a Config) -> Self {
        ToolResolver {
            exec,
            config,
            interpreter: InterpreterLocator::new(exec, config.python_location.clone()),
            attempted: RefCell::new(HashSet::new()),
        }
    }

    /// The run's interpreter locator.
    pub fn interpreter(&self) -> &InterpreterLocator<'a> {
        &self.interpreter
    }

    /// Look a tool up and decide what to do if it is missing.
    pub fn probe(&self, tool: Tool) -> Resolution {
        match self.exec.find_executable(tool.binary()) {
            Some(path) if !path.as_os_str().is_empty() => {
                Resolution::Found(ResolvedTool::new(tool.binary(), path))
            }
            _ => match tool.install_policy() {
                InstallPolicy::Pip { .. } if !self.attempted.borrow().contains(&tool) => {
                    Resolution::NeedsInstall
                }
                _ => Resolution::Unavailable,
            },
        }
    }

    /// Find a tool, installing it first if allowed.
    pub fn resolve(&self, tool: Tool) -> Result<ResolvedTool, RunError> {
        tracing::debug!("Checking for {}...", tool);

        match self.probe(tool) {
            Resolution::Found(resolved) => {
                tracing::debug!("Found {} at {}", tool, resolved.path.display());
                return Ok(resolved);
            }
            Resolution::NeedsInstall => self.install(tool)?,
            Resolution::Unavailable => return Err(unavailable(tool)),
        }

        match self.probe(tool) {
            Resolution::Found(resolved) => {
                tracing::debug!("Found {} at {} after installing", tool, resolved.path.display());
                Ok(resolved)
            }
            Resolution::NeedsInstall | Resolution::Unavailable => {
                Err(RunError::ToolUnavailable(tool.to_string()))
            }
        }
    }

    fn install(&self, tool: Tool) -> Result<(), RunError> {
        let (InstallPolicy::Pip { package }, Some(version)) =
            (tool.install_policy(), tool.pinned_version(self.config))
        else {
            return Err(unavailable(tool));
        };

        self.attempted.borrow_mut().insert(tool);
        tracing::info!("Installing {} version {}", tool, version);

        let python = self.interpreter.get()?;
        let cmd = ProcessBuilder::new(&python.path)
            .args(["-m", "pip", "install"])
            .arg(format!("{}=={}", package, version))
            .env("PIP_DISABLE_PIP_VERSION_CHECK", "1");

        run_checked(self.exec, &cmd)
    }
}

fn unavailable(tool: Tool) -> RunError {
    match tool.install_policy() {
        InstallPolicy::Preinstalled => RunError::ToolMustBePreinstalled(tool.to_string()),
        InstallPolicy::Pip { .. } => RunError::ToolUnavailable(tool.to_string()),
    }
}
