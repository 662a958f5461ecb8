//! High-level operations.

pub mod dispatch;
pub mod run;

pub use dispatch::ActionDispatcher;
pub use run::{failure_message, report_failure, run, RunOptions};
