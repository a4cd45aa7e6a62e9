// src/engine/runner.rs

use std::collections::VecDeque;

use tracing::{debug, error, info};

use crate::errors::Result;
use crate::exec::{CommandExecutor, CommandSpec};

/// Runs a queue of commands strictly in order, stopping at the first failure.
#[derive(Debug, Clone, Copy)]
pub struct PipelineRunner<'a> {
    executor: &'a CommandExecutor,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(executor: &'a CommandExecutor) -> Self {
        Self { executor }
    }

    /// Execute every spec front-to-back.
    ///
    /// The front element is removed only after it succeeds; on failure the
    /// remaining elements are never attempted and the step's error is
    /// returned unchanged. An empty queue succeeds without running anything.
    pub async fn run_all(&self, queue: impl IntoIterator<Item = CommandSpec>) -> Result<()> {
        let mut queue: VecDeque<CommandSpec> = queue.into_iter().collect();
        let total = queue.len();
        let mut step = 0usize;

        while let Some(spec) = queue.front() {
            debug!(step, total, cmd = %spec.command_line, "running pipeline step");

            if let Err(err) = self.executor.execute(spec).await {
                error!(step, total, error = %err, "pipeline step failed; aborting");
                return Err(err);
            }

            queue.pop_front();
            step += 1;
        }

        info!(steps = total, "pipeline complete");
        Ok(())
    }
}
