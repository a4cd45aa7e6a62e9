// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] is the process boundary: the `CommandBackend` trait and the
//!   production `ShellBackend`, which tests replace with a scripted fake.
//! - [`archive`] persists the raw outcome of every invocation for audit.
//! - [`executor`] runs one `CommandSpec`, archives it, and classifies the
//!   result into success (stdout) or a `MaintError`.

use std::path::PathBuf;

pub mod archive;
pub mod backend;
pub mod executor;

pub use archive::{ArchiveSink, FsArchiveSink};
pub use backend::{CommandBackend, ShellBackend};
pub use executor::CommandExecutor;

/// One command to run, where to archive its output, and what its stdout
/// must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command_line: String,
    pub archive_dir: PathBuf,
    pub expected_substrings: Option<Vec<String>>,
}

impl CommandSpec {
    pub fn new(command_line: impl Into<String>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            command_line: command_line.into(),
            archive_dir: archive_dir.into(),
            expected_substrings: None,
        }
    }

    pub fn expecting<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_substrings = Some(substrings.into_iter().map(Into::into).collect());
        self
    }
}

/// Raw outcome of one external-process invocation.
///
/// Launch failures and non-zero exits both land in `exit_error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_error: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_error: None,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Text written to the archive: `Error:`, `StdErr:`, `Data:` sections.
    pub fn archive_record(&self) -> String {
        format!(
            "Error:\n{}\nStdErr:\n{}\nData:\n{}",
            self.exit_error.as_deref().unwrap_or("null"),
            self.stderr,
            self.stdout
        )
    }
}
