// src/engine/poller.rs

//! Bounded polling of a managed resource until it reports a desired state.
//!
//! [`PollState`] is the pure state machine; [`StatePoller`] is the async
//! shell that sleeps, queries through the executor, and feeds responses in.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::commands::CommandBuilder;
use crate::config::PollSection;
use crate::errors::{MaintError, Result};
use crate::exec::CommandExecutor;

/// Delay between poll attempts. Injected so tests run without real waiting.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Non-blocking timer sleep on the Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub max_attempts: u32,
    pub wait: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            wait: Duration::from_millis(1000),
        }
    }
}

impl From<&PollSection> for PollSettings {
    fn from(section: &PollSection) -> Self {
        Self {
            max_attempts: section.max_attempts,
            wait: section.wait(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Polling,
    Matched,
    Exhausted,
    HardError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub resource_id: String,
    pub desired_state: String,
    pub remaining_attempts: u32,
    pub wait: Duration,
}

impl PollState {
    pub fn new(resource_id: &str, desired_state: &str, settings: PollSettings) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            desired_state: desired_state.to_string(),
            remaining_attempts: settings.max_attempts,
            wait: settings.wait,
        }
    }

    /// Status before issuing the next query.
    pub fn status(&self) -> PollStatus {
        if self.remaining_attempts == 0 {
            PollStatus::Exhausted
        } else {
            PollStatus::Polling
        }
    }

    /// Feed one show-resource response into the machine.
    pub fn observe(&mut self, response: &str) -> PollStatus {
        match extract_current_state(response) {
            None => PollStatus::HardError,
            Some(current) if current == self.desired_state => PollStatus::Matched,
            Some(_) => {
                self.remaining_attempts = self.remaining_attempts.saturating_sub(1);
                self.status()
            }
        }
    }

    fn timeout_error(&self) -> MaintError {
        MaintError::TimeoutError {
            resource: self.resource_id.clone(),
            desired: self.desired_state.clone(),
        }
    }
}

/// Token following `current:` on the same line of a show-resource
/// response, if any.
pub fn extract_current_state(response: &str) -> Option<&str> {
    let (_, rest) = response.split_once("current:")?;
    rest.lines().next()?.split_whitespace().next()
}

pub struct StatePoller<'a> {
    executor: &'a CommandExecutor,
    commands: &'a CommandBuilder,
    sleeper: &'a dyn Sleeper,
    settings: PollSettings,
}

impl<'a> StatePoller<'a> {
    pub fn new(
        executor: &'a CommandExecutor,
        commands: &'a CommandBuilder,
        sleeper: &'a dyn Sleeper,
        settings: PollSettings,
    ) -> Self {
        Self {
            executor,
            commands,
            sleeper,
            settings,
        }
    }

    /// Wait until `resource_id` reports `desired_state`.
    ///
    /// Sleeps before every query, including the first. A failed query or an
    /// unparseable response ends polling immediately; only a state mismatch
    /// is retried.
    pub async fn await_state(&self, resource_id: &str, desired_state: &str) -> Result<()> {
        let mut state = PollState::new(resource_id, desired_state, self.settings);
        let query = self.commands.show_resource(resource_id);
        let mut attempt = 0u32;

        loop {
            if state.status() == PollStatus::Exhausted {
                warn!(
                    resource = resource_id,
                    desired = desired_state,
                    attempts = attempt,
                    "resource did not reach desired state"
                );
                return Err(state.timeout_error());
            }

            self.sleeper.sleep(state.wait).await;
            attempt += 1;

            let response = self.executor.execute(&query).await?;

            match state.observe(&response) {
                PollStatus::Matched => {
                    info!(
                        resource = resource_id,
                        state = desired_state,
                        attempts = attempt,
                        "resource reached desired state"
                    );
                    return Ok(());
                }
                PollStatus::HardError => {
                    return Err(MaintError::UnparseableState {
                        resource: resource_id.to_string(),
                        output: response,
                    });
                }
                PollStatus::Polling | PollStatus::Exhausted => {
                    debug!(
                        resource = resource_id,
                        desired = desired_state,
                        current = ?extract_current_state(&response),
                        remaining = state.remaining_attempts,
                        "resource not in desired state yet"
                    );
                }
            }
        }
    }
}
