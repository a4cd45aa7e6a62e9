// src/exec/executor.rs

use std::fmt;

use tracing::{debug, warn};

use crate::errors::{MaintError, Result};

use super::{ArchiveSink, CommandBackend, CommandSpec, ExecutionResult};

/// Runs single commands and turns their raw outcome into a `Result`.
///
/// Every call archives exactly one record before any error is returned.
pub struct CommandExecutor {
    backend: Box<dyn CommandBackend>,
    sink: Box<dyn ArchiveSink>,
}

impl fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

impl CommandExecutor {
    pub fn new(backend: impl CommandBackend + 'static, sink: impl ArchiveSink + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            sink: Box::new(sink),
        }
    }

    /// Execute `spec` and return its stdout.
    ///
    /// Failure precedence: exit/launch error, then non-empty stderr, then the
    /// first expected substring missing from stdout.
    pub async fn execute(&self, spec: &CommandSpec) -> Result<String> {
        let result = self.backend.run(&spec.command_line).await;

        if let Err(e) = self.sink.record(&spec.archive_dir, &result.archive_record()) {
            warn!(
                dir = %spec.archive_dir.display(),
                error = %e,
                "failed to archive command output"
            );
        }

        classify(spec, result)
    }
}

fn classify(spec: &CommandSpec, result: ExecutionResult) -> Result<String> {
    if let Some(message) = result.exit_error {
        return Err(MaintError::ExitError {
            command: spec.command_line.clone(),
            message,
        });
    }

    if !result.stderr.is_empty() {
        return Err(MaintError::StderrError {
            command: spec.command_line.clone(),
            stderr: result.stderr,
        });
    }

    if let Some(expected) = &spec.expected_substrings {
        verify_output(&result.stdout, expected)?;
    }

    debug!(cmd = %spec.command_line, "command succeeded");
    Ok(result.stdout)
}

/// Check that every expected substring occurs in `output`, reporting the
/// first one that does not.
pub fn verify_output(output: &str, expected: &[String]) -> Result<()> {
    match expected.iter().find(|s| !output.contains(s.as_str())) {
        Some(missing) => Err(MaintError::VerificationError {
            missing: missing.clone(),
            output: output.to_string(),
        }),
        None => Ok(()),
    }
}
