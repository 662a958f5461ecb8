//! Core data types: actions and run errors.

pub mod action;
pub mod error;

pub use action::{Action, ActionSpec, Arg, Program};
pub use error::RunError;
