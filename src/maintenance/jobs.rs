// src/maintenance/jobs.rs

//! Batch job submission and return-code checks.
//!
//! `jobs submit ... --rfj` prints a JSON envelope whose `data` object
//! describes the completed job. The spool is downloaded by the CLI itself
//! into `<download_dir>/<jobid>/<step>/<dd>.txt`.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{MaintError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobResponse {
    pub jobid: String,

    #[serde(default)]
    pub jobname: Option<String>,

    /// `CC nnnn` on normal completion; `ABEND ...`, `JCL ERROR` or null
    /// otherwise.
    #[serde(default)]
    pub retcode: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Value,
}

/// Numeric part of a `CC nnnn` return code.
pub fn parse_condition_code(retcode: &str) -> Option<u32> {
    let mut parts = retcode.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("CC"), Some(code)) => code.parse().ok(),
        _ => None,
    }
}

/// Parse `--rfj` output and accept the job only if it ended with
/// `CC nnnn` where `nnnn <= max_rc`.
pub fn parse_job_response(stdout: &str, max_rc: u32) -> Result<JobResponse> {
    let envelope: Envelope = serde_json::from_str(stdout)?;
    let job: JobResponse = serde_json::from_value(envelope.data.clone())?;

    match job.retcode.as_deref().and_then(parse_condition_code) {
        Some(rc) if rc <= max_rc => Ok(job),
        _ => {
            let diagnostics = serde_json::to_string_pretty(&envelope.data)?;
            Err(MaintError::JobFailed(diagnostics))
        }
    }
}
