//! meson-action - run one Meson build action inside a CI pipeline
//!
//! Given an action (build, install, test, coverage, tidy) and a build
//! directory, this crate makes sure Ninja, Meson and any action-specific
//! tool are available (installing them with pip when missing), configures
//! the build directory if needed, and runs the single command that carries
//! out the action.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildGate, InterpreterLocator, ResolvedTool, Tool, ToolResolver};
pub use crate::core::{Action, RunError};
pub use ops::{run, ActionDispatcher, RunOptions};
pub use util::{Config, RawInputs};
