//! Test utilities for unit tests.
//!
//! [`MockExecutor`] stands in for the real search path and subprocesses. It
//! records every lookup and every spawned command, and can simulate the side
//! effects the pipeline depends on: a pip install putting a binary on the
//! search path, or `meson setup` writing the build manifest.
//!
//! # Example
//!
//! ```rust,ignore
//! let exec = MockExecutor::new()
//!     .with_tool("python")
//!     .expect_contains("pip install ninja", MockOutcome::success().provides("ninja"));
//! ```

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::Action;
use crate::util::config::{Config, RawInputs};
use crate::util::process::{ProcessBuilder, ProcessExecutor, ProcessStatus};

/// Directory simulated pre-installed tools live in.
pub const SYSTEM_BIN: &str = "/usr/bin";

/// Directory simulated pip installs put binaries in.
pub const PIP_BIN: &str = "/opt/pip/bin";

/// Build a validated config with the built-in version pins.
pub fn config(action: Action, directory: &Path) -> Config {
    RawInputs {
        action: Some(action.to_string()),
        directory: Some(directory.display().to_string()),
        ..Default::default()
    }
    .validate()
    .expect("test config should validate")
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// Scripted result of a command.
#[derive(Debug, Clone)]
pub struct MockOutcome {
    /// Exit code, or `None` to fail the spawn itself.
    pub exit_code: Option<i32>,
    /// Tools that become locatable after the command runs.
    pub provides: Vec<String>,
    /// Files written by the command.
    pub creates: Vec<PathBuf>,
}

impl MockOutcome {
    /// A command that exits with status 0.
    pub fn success() -> Self {
        MockOutcome {
            exit_code: Some(0),
            provides: Vec::new(),
            creates: Vec::new(),
        }
    }

    /// A command that exits with the given non-zero status.
    pub fn failure(code: i32) -> Self {
        MockOutcome {
            exit_code: Some(code),
            ..Self::success()
        }
    }

    /// A command whose program cannot be spawned.
    pub fn spawn_error() -> Self {
        MockOutcome {
            exit_code: None,
            ..Self::success()
        }
    }

    /// Put a tool on the simulated search path.
    pub fn provides(mut self, tool: &str) -> Self {
        self.provides.push(tool.to_string());
        self
    }

    /// Write an empty file when the command runs.
    pub fn creates(mut self, path: impl Into<PathBuf>) -> Self {
        self.creates.push(path.into());
        self
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub outcome: MockOutcome,
}

#[derive(Debug, Default)]
struct MockState {
    search_path: HashMap<String, PathBuf>,
    expectations: Vec<CommandExpectation>,
    lookups: Vec<String>,
    calls: Vec<ProcessBuilder>,
}

/// Mock process executor.
///
/// Commands without a matching expectation succeed with no side effects.
#[derive(Debug, Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    /// Create a mock with an empty search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a tool locatable under [`SYSTEM_BIN`].
    pub fn with_tool(self, name: &str) -> Self {
        self.lock()
            .search_path
            .insert(name.to_string(), PathBuf::from(SYSTEM_BIN).join(name));
        self
    }

    /// Make several tools locatable.
    pub fn with_tools(self, names: &[&str]) -> Self {
        names.iter().fold(self, |exec, name| exec.with_tool(name))
    }

    /// Script commands containing a substring.
    pub fn expect_contains(self, substring: &str, outcome: MockOutcome) -> Self {
        self.lock().expectations.push(CommandExpectation {
            pattern: CommandPattern::Contains(substring.to_string()),
            outcome,
        });
        self
    }

    /// Script commands starting with a prefix.
    pub fn expect_prefix(self, prefix: &str, outcome: MockOutcome) -> Self {
        self.lock().expectations.push(CommandExpectation {
            pattern: CommandPattern::StartsWith(prefix.to_string()),
            outcome,
        });
        self
    }

    /// Every command spawned so far, rendered as a command line.
    pub fn calls(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .map(ProcessBuilder::display_command)
            .collect()
    }

    /// Every command spawned so far.
    pub fn commands(&self) -> Vec<ProcessBuilder> {
        self.lock().calls.clone()
    }

    /// Number of spawned commands containing a substring.
    pub fn count_calls(&self, substring: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(substring)).count()
    }

    /// Every search-path lookup so far, by tool name.
    pub fn lookups(&self) -> Vec<String> {
        self.lock().lookups.clone()
    }

    /// Number of search-path lookups for one tool.
    pub fn count_lookups(&self, name: &str) -> usize {
        self.lock().lookups.iter().filter(|l| *l == name).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessExecutor for MockExecutor {
    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        let mut state = self.lock();
        state.lookups.push(name.to_string());
        state.search_path.get(name).cloned()
    }

    fn status(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        let mut state = self.lock();
        state.calls.push(cmd.clone());

        let line = cmd.display_command();
        let outcome = state
            .expectations
            .iter()
            .find(|exp| exp.pattern.matches(&line))
            .map(|exp| exp.outcome.clone())
            .unwrap_or_else(MockOutcome::success);

        let Some(code) = outcome.exit_code else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "program not found"));
        };

        for tool in outcome.provides {
            let path = PathBuf::from(PIP_BIN).join(&tool);
            state.search_path.insert(tool, path);
        }

        for file in outcome.creates {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&file, b"")?;
        }

        Ok(ProcessStatus::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_pattern() {
        assert!(CommandPattern::StartsWith("ninja".into()).matches("ninja -C b"));
        assert!(CommandPattern::Contains("-C".into()).matches("ninja -C b"));
        assert!(!CommandPattern::Contains("setup".into()).matches("ninja -C b"));
    }

    #[test]
    fn test_mock_install_provides_tool() {
        let exec = MockExecutor::new()
            .expect_contains("pip install", MockOutcome::success().provides("meson"));

        assert_eq!(exec.find_executable("meson"), None);
        let status = exec
            .status(&ProcessBuilder::new("python").args(["-m", "pip", "install", "meson"]))
            .unwrap();
        assert!(status.success());
        assert_eq!(
            exec.find_executable("meson"),
            Some(PathBuf::from(PIP_BIN).join("meson"))
        );
        assert_eq!(exec.count_lookups("meson"), 2);
    }

    #[test]
    fn test_mock_spawn_error() {
        let exec = MockExecutor::new().expect_prefix("gcovr", MockOutcome::spawn_error());

        assert!(exec.status(&ProcessBuilder::new("gcovr")).is_err());
        assert_eq!(exec.calls(), ["gcovr"]);
    }
}
