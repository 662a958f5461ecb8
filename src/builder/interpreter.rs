//! Locating the Python interpreter that performs on-demand installs.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::builder::tools::ResolvedTool;
use crate::core::RunError;
use crate::util::process::ProcessExecutor;

/// Name of the interpreter binary.
pub const PYTHON: &str = "python";

/// Finds Python once per run and hands out the same handle afterwards.
pub struct InterpreterLocator<'a> {
    exec: &'a dyn ProcessExecutor,
    /// Installation prefix supplied by the environment (`pythonLocation`)
    location: Option<PathBuf>,
    handle: OnceLock<ResolvedTool>,
}

impl<'a> InterpreterLocator<'a> {
    pub fn new(exec: &'a dyn ProcessExecutor, location: Option<PathBuf>) -> Self {
        InterpreterLocator {
            exec,
            location,
            handle: OnceLock::new(),
        }
    }

    /// Get the interpreter, probing for it on first use only.
    pub fn get(&self) -> Result<&ResolvedTool, RunError> {
        if let Some(handle) = self.handle.get() {
            tracing::debug!("Using Python from cache");
            return Ok(handle);
        }

        let handle = self.probe()?;
        Ok(self.handle.get_or_init(|| handle))
    }

    fn probe(&self) -> Result<ResolvedTool, RunError> {
        tracing::debug!("Searching for Python...");

        if let Some(ref location) = self.location {
            tracing::debug!("Found Python from setup-python at {}", location.display());
            return Ok(ResolvedTool::new(PYTHON, location.join(PYTHON)));
        }

        match self.exec.find_executable(PYTHON) {
            Some(path) if !path.as_os_str().is_empty() => {
                tracing::debug!("Found Python at {}", path.display());
                Ok(ResolvedTool::new(PYTHON, path))
            }
            _ => Err(RunError::InterpreterUnavailable),
        }
    }
}
