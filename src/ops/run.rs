//! Top-level run: inputs in, one command out, failures reported once.

use std::io::{self, Write};
use std::path::Path;

use crate::core::RunError;
use crate::ops::dispatch::ActionDispatcher;
use crate::util::config::{ConfigFile, RawInputs};
use crate::util::process::{ProcessBuilder, ProcessExecutor};

/// Options controlling a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'p> {
    /// Defaults file to merge under the inputs
    pub config_file: Option<&'p Path>,
}

/// Validate the inputs and carry out the requested action.
///
/// Returns the action command that ran. Nothing is resolved or spawned if
/// the inputs are invalid.
pub fn run(
    inputs: RawInputs,
    opts: &RunOptions<'_>,
    exec: &dyn ProcessExecutor,
) -> Result<ProcessBuilder, RunError> {
    tracing::debug!("Processing args...");

    // An unknown action outranks any problem with the defaults file.
    inputs.action()?;

    let inputs = match opts.config_file {
        Some(path) => inputs.with_defaults(&ConfigFile::load(path)?),
        None => inputs,
    };
    let config = inputs.validate()?;

    ActionDispatcher::new(exec, &config).dispatch()
}

/// Render an error with its chain of causes.
pub fn failure_message(err: &RunError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Escape a message for a workflow command.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Mark the workflow step failed with the error as its reason.
pub fn report_failure(out: &mut impl Write, err: &RunError) -> io::Result<()> {
    writeln!(out, "::error::{}", escape_workflow_data(&failure_message(err)))
}
