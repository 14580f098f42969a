//! Command handlers - extracted from main.rs for testability
//!
//! Each handler returns a [`Verdict`] that main maps to the process exit code.

pub mod inspect;
pub mod validate;

pub use inspect::{execute_grammar, execute_lint, execute_table, load_table, TableRow};
pub use validate::{execute_validate, resolve_grammar, ValidateSummary};

use std::process::ExitCode;

/// Outcome of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The command succeeded (trace matched, grammar clean)
    Success,
    /// The check ran and failed
    Failed,
}

impl Verdict {
    /// Build from a pass/fail flag
    #[must_use]
    pub const fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Success
        } else {
            Self::Failed
        }
    }

    /// Process exit code
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Failed => ExitCode::from(1),
        }
    }
}

/// Exit code for usage, configuration and I/O errors
#[must_use]
pub fn error_exit_code() -> ExitCode {
    ExitCode::from(2)
}
