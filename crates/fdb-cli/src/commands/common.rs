//! Helpers shared by CLI commands

use std::fmt;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and the database is disconnected.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; the command already reported the failure.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Pluralize "migration" for summaries.
pub(crate) fn migrations_word(count: usize) -> &'static str {
    if count == 1 {
        "migration"
    } else {
        "migrations"
    }
}
