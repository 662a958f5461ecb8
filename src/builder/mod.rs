//! Toolchain provisioning and build directory setup.

pub mod gate;
pub mod interpreter;
pub mod tools;

pub use gate::{BuildGate, GateOutcome, BUILD_MANIFEST};
pub use interpreter::InterpreterLocator;
pub use tools::{InstallPolicy, Resolution, ResolvedTool, Tool, ToolResolver};
