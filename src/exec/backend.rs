// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The executor talks to a `CommandBackend` rather than spawning processes
//! itself, so tests can substitute a scripted fake that records command lines
//! and returns canned output.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::ExecutionResult;

/// Trait abstracting how one command line is executed.
pub trait CommandBackend: Send + Sync {
    /// Run `command_line` to completion and capture its output.
    ///
    /// Never fails: a launch error is reported through
    /// [`ExecutionResult::exit_error`] so that it is archived like any other
    /// outcome.
    fn run<'a>(
        &'a self,
        command_line: &'a str,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>>;
}

/// Production backend: runs the command line through the platform shell.
#[derive(Debug, Clone, Default)]
pub struct ShellBackend {
    working_dir: Option<PathBuf>,
}

impl ShellBackend {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(working_dir.into()),
        }
    }

    fn shell_command(&self, command_line: &str) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(command_line);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(command_line);
            c
        };
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl CommandBackend for ShellBackend {
    fn run<'a>(
        &'a self,
        command_line: &'a str,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>> {
        Box::pin(async move {
            info!(cmd = %command_line, "starting command");

            let output = match self.shell_command(command_line).output().await {
                Ok(output) => output,
                Err(e) => {
                    return ExecutionResult {
                        exit_error: Some(format!("failed to launch command: {e}")),
                        ..ExecutionResult::default()
                    };
                }
            };

            let code = output.status.code();
            debug!(
                cmd = %command_line,
                exit_code = ?code,
                success = output.status.success(),
                "command exited"
            );

            let exit_error = if output.status.success() {
                None
            } else {
                Some(match code {
                    Some(code) => format!("Command failed with exit code {code}"),
                    None => "Command terminated by signal".to_string(),
                })
            };

            ExecutionResult {
                exit_error,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        })
    }
}
