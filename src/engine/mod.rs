// src/engine/mod.rs

//! Sequencing core for maintflow.
//!
//! - [`runner`]: fail-fast, strictly ordered command pipeline.
//! - [`poller`]: bounded polling of a resource until it reports a state.
//! - [`resource`]: start/stop a resource, wait for it, optionally APF
//!   authorize a dataset afterwards.
//!
//! Everything here runs one external command at a time; the only suspension
//! points are the process waits and the poller's sleep.

pub mod poller;
pub mod resource;
pub mod runner;

pub use poller::{PollSettings, PollState, PollStatus, Sleeper, StatePoller, TokioSleeper};
pub use resource::ResourceController;
pub use runner::PipelineRunner;
