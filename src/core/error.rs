//! Error kinds surfaced by a run.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised anywhere between reading the inputs and running the final command.
///
/// Only the install-then-retry path inside tool resolution recovers from a
/// failure; every other variant aborts the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("unknown Meson action: `{0}`")]
    InvalidAction(String),

    #[error("invalid input `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("Python could not be found")]
    InterpreterUnavailable,

    #[error("`{0}` could not be found after installing")]
    ToolUnavailable(String),

    #[error("`{0}` must be installed to run it")]
    ToolMustBePreinstalled(String),

    #[error("project in `{}` was not set up successfully", .directory.display())]
    SetupFailed { directory: PathBuf },

    #[error("`{command}` {}", exit_description(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to execute `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("failed with exit code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl RunError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::InvalidAction(_) => "InvalidAction",
            RunError::InvalidConfig { .. }
            | RunError::ConfigRead { .. }
            | RunError::ConfigParse { .. } => "InvalidConfig",
            RunError::InterpreterUnavailable => "InterpreterUnavailable",
            RunError::ToolUnavailable(_) => "ToolUnavailable",
            RunError::ToolMustBePreinstalled(_) => "ToolMustBePreinstalled",
            RunError::SetupFailed { .. } => "SetupFailed",
            RunError::CommandFailed { .. } | RunError::Spawn { .. } => "CommandFailed",
        }
    }
}
