//! Shared utilities

pub mod config;
pub mod process;

pub use config::{Config, ConfigFile, RawInputs};
pub use process::{ProcessBuilder, ProcessExecutor, ProcessStatus, SystemExecutor};
