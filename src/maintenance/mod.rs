// src/maintenance/mod.rs

//! The software-maintenance workflow built on the engine: SMP/E jobs,
//! transfers, resource restarts, HOLDDATA review and fix-level checks.

pub mod fixlevel;
pub mod holddata;
pub mod jobs;
pub mod sequence;
pub mod tasks;

pub use fixlevel::find_fix_level;
pub use holddata::{summarize_holddata, HoldActions};
pub use jobs::{parse_condition_code, parse_job_response, JobResponse};
pub use sequence::expand_plan;
pub use tasks::{Credentials, Maintenance};
