//! The closed set of actions and the command table that realizes each one.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::builder::tools::Tool;
use crate::core::error::RunError;

/// A logical build action requested by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Build,
    Install,
    Test,
    Coverage,
    Tidy,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 5] = [
        Action::Build,
        Action::Install,
        Action::Test,
        Action::Coverage,
        Action::Tidy,
    ];

    /// Get the input spelling of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Build => "build",
            Action::Install => "install",
            Action::Test => "test",
            Action::Coverage => "coverage",
            Action::Tidy => "tidy",
        }
    }

    /// Look up the command declaration for this action.
    pub fn spec(&self) -> &'static ActionSpec {
        match self {
            Action::Build => &BUILD,
            Action::Install => &INSTALL,
            Action::Test => &TEST,
            Action::Coverage => &COVERAGE,
            Action::Tidy => &TIDY,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "build" => Ok(Action::Build),
            "install" => Ok(Action::Install),
            "test" => Ok(Action::Test),
            "coverage" => Ok(Action::Coverage),
            "tidy" => Ok(Action::Tidy),
            _ => Err(RunError::InvalidAction(s.to_string())),
        }
    }
}

/// Which resolved binary runs the final command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// The tool is always resolved before the build gate.
    Base(Tool),
    /// The tool is resolved only for this action, after the build gate.
    Extra(Tool),
}

/// One piece of the final argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Lit(&'static str),
    Directory,
}

/// Data declaration of how an action is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    /// Binary that realizes the action
    pub program: Program,

    /// Argument template; `Arg::Directory` expands to the build directory
    pub args: &'static [Arg],

    /// Whether setup must enable coverage instrumentation
    pub coverage_setup: bool,
}

impl ActionSpec {
    /// Expand the argument template for a build directory.
    pub fn expand_args(&self, directory: &Path) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Lit(s) => s.to_string(),
                Arg::Directory => directory.display().to_string(),
            })
            .collect()
    }
}

static BUILD: ActionSpec = ActionSpec {
    program: Program::Base(Tool::Ninja),
    args: &[Arg::Lit("-C"), Arg::Directory],
    coverage_setup: false,
};

static INSTALL: ActionSpec = ActionSpec {
    program: Program::Base(Tool::Meson),
    args: &[Arg::Lit("install"), Arg::Lit("-C"), Arg::Directory],
    coverage_setup: false,
};

static TEST: ActionSpec = ActionSpec {
    program: Program::Base(Tool::Meson),
    args: &[Arg::Lit("test"), Arg::Lit("-C"), Arg::Directory],
    coverage_setup: false,
};

static COVERAGE: ActionSpec = ActionSpec {
    program: Program::Extra(Tool::Gcovr),
    args: &[Arg::Lit("-C"), Arg::Directory, Arg::Lit("coverage")],
    coverage_setup: true,
};

static TIDY: ActionSpec = ActionSpec {
    program: Program::Extra(Tool::ClangTidy),
    args: &[Arg::Lit("-C"), Arg::Directory, Arg::Lit("clang-tidy")],
    coverage_setup: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("build".parse::<Action>().unwrap(), Action::Build);
        assert_eq!("Coverage".parse::<Action>().unwrap(), Action::Coverage);
        assert_eq!("TIDY".parse::<Action>().unwrap(), Action::Tidy);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "deploy".parse::<Action>().unwrap_err();
        assert!(matches!(err, RunError::InvalidAction(ref s) if s == "deploy"));
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_display_roundtrips_input_spelling() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_expand_args() {
        let dir = Path::new("build");
        assert_eq!(Action::Build.spec().expand_args(dir), ["-C", "build"]);
        assert_eq!(Action::Test.spec().expand_args(dir), ["test", "-C", "build"]);
        assert_eq!(
            Action::Coverage.spec().expand_args(dir),
            ["-C", "build", "coverage"]
        );
    }

    #[test]
    fn test_no_two_actions_share_a_command() {
        for a in Action::ALL {
            for b in Action::ALL {
                if a != b {
                    let (sa, sb) = (a.spec(), b.spec());
                    assert!(sa.program != sb.program || sa.args != sb.args);
                }
            }
        }
    }

    #[test]
    fn test_only_coverage_instruments_setup() {
        for action in Action::ALL {
            assert_eq!(action.spec().coverage_setup, action == Action::Coverage);
        }
    }
}
