// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintError {
    /// The process could not be launched or exited with a failure status.
    #[error("command failed: {command}\n{message}")]
    ExitError { command: String, message: String },

    /// The process exited successfully but wrote diagnostics to stderr.
    #[error("\nCommand:\n{command}\n{stderr}")]
    StderrError { command: String, stderr: String },

    #[error("{missing} not found in response: {output}")]
    VerificationError { missing: String, output: String },

    #[error("{resource} did not reach desired state of {desired} in the allotted time")]
    TimeoutError { resource: String, desired: String },

    #[error("Unrecognized desired state of: {0}. Expected UP or DOWN.")]
    ValidationError(String),

    #[error("could not find current state of {resource} in response: {output}")]
    UnparseableState { resource: String, output: String },

    #[error("Job did not complete successfully. Additional diagnostics: {0}")]
    JobFailed(String),

    /// Downloaded job output did not have the expected layout.
    #[error("Unexpected report format: {0}")]
    ReportFormat(String),

    #[error("Fix level of {module} is {actual:?}, expected {expected}")]
    FixLevelMismatch {
        module: String,
        expected: String,
        actual: Option<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cycle detected in task sequences: {0}")]
    SequenceCycle(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MaintError>;
