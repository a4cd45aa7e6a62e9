use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::MaintError;

/// Target lifecycle state of a managed resource.
///
/// The external CLI reports these as the literal tokens `UP` and `DOWN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Up,
    Down,
}

impl ResourceState {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceState::Up => "UP",
            ResourceState::Down => "DOWN",
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceState {
    type Err = MaintError;

    /// Exact match only; the tokens are case-sensitive on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(ResourceState::Up),
            "DOWN" => Ok(ResourceState::Down),
            other => Err(MaintError::ValidationError(other.to_string())),
        }
    }
}

/// Transport used by a CLI profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("http"),
            Protocol::Https => f.write_str("https"),
        }
    }
}

/// Maintenance steps that map directly to one operation.
///
/// Composite workflows (`reset`, `start`, `stop`) are sequences of these and
/// live in configuration, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTask {
    Apf,
    Apply,
    ApplyCheck,
    Copy,
    Download,
    Receive,
    Reject,
    RestartWorkflow,
    Restore,
    Start1,
    Start2,
    Stop1,
    Stop2,
    Upload,
    Verify,
}

impl BuiltinTask {
    pub const ALL: [BuiltinTask; 15] = [
        BuiltinTask::Apf,
        BuiltinTask::Apply,
        BuiltinTask::ApplyCheck,
        BuiltinTask::Copy,
        BuiltinTask::Download,
        BuiltinTask::Receive,
        BuiltinTask::Reject,
        BuiltinTask::RestartWorkflow,
        BuiltinTask::Restore,
        BuiltinTask::Start1,
        BuiltinTask::Start2,
        BuiltinTask::Stop1,
        BuiltinTask::Stop2,
        BuiltinTask::Upload,
        BuiltinTask::Verify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinTask::Apf => "apf",
            BuiltinTask::Apply => "apply",
            BuiltinTask::ApplyCheck => "apply-check",
            BuiltinTask::Copy => "copy",
            BuiltinTask::Download => "download",
            BuiltinTask::Receive => "receive",
            BuiltinTask::Reject => "reject",
            BuiltinTask::RestartWorkflow => "restart-workflow",
            BuiltinTask::Restore => "restore",
            BuiltinTask::Start1 => "start1",
            BuiltinTask::Start2 => "start2",
            BuiltinTask::Stop1 => "stop1",
            BuiltinTask::Stop2 => "stop2",
            BuiltinTask::Upload => "upload",
            BuiltinTask::Verify => "verify",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BuiltinTask::Apf => "APF authorize dataset",
            BuiltinTask::Apply => "Apply Maintenance",
            BuiltinTask::ApplyCheck => "Apply Check Maintenance",
            BuiltinTask::Copy => "Copy Maintenance to Runtime",
            BuiltinTask::Download => "Download Maintenance",
            BuiltinTask::Receive => "Receive Maintenance",
            BuiltinTask::Reject => "Reject Maintenance",
            BuiltinTask::RestartWorkflow => "Create & trigger workflow to restart the product",
            BuiltinTask::Restore => "Restore Maintenance",
            BuiltinTask::Start1 => "Start SSM managed resource1",
            BuiltinTask::Start2 => "Start SSM managed resource2",
            BuiltinTask::Stop1 => "Stop SSM managed resource1",
            BuiltinTask::Stop2 => "Stop SSM managed resource2",
            BuiltinTask::Upload => "Upload Maintenance to USS",
            BuiltinTask::Verify => "Verify the maintained module is at the expected fix level",
        }
    }
}

impl fmt::Display for BuiltinTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinTask {
    type Err = MaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinTask::ALL
            .into_iter()
            .find(|task| task.name() == s)
            .ok_or_else(|| MaintError::TaskNotFound(s.to_string()))
    }
}
