// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::Protocol;

/// Raw configuration as deserialized from TOML, before validation.
///
/// ```toml
/// [cli]
/// program = "zowe"
///
/// [poll]
/// max_attempts = 30
/// wait_ms = 1000
///
/// [zosmf]
/// port = 443
///
/// [maintenance]
/// remote_jcl_pds = "USER.MAINT.JCL"
/// receive_member = "RECEIVE"
/// # ...
///
/// [ssm]
/// resource1 = "SYSVIEW1"
/// resource2 = "SYSVIEW2"
///
/// [sequence.reset]
/// steps = ["reject", "restore", "stop", "copy", "start", "apf"]
/// ```
///
/// `[zosmf]`, `[fmp]`, `[ops]`, `[maintenance]` and `[ssm]` are required;
/// everything else has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub cli: CliSection,

    #[serde(default)]
    pub poll: PollSection,

    #[serde(default)]
    pub archive: ArchiveSection,

    pub zosmf: ZosmfSection,

    pub fmp: ServiceSection,

    pub ops: ServiceSection,

    pub maintenance: MaintenanceSection,

    pub ssm: SsmSection,

    /// Named task sequences from `[sequence.<name>]`, merged over the
    /// built-in `reset` / `start` / `stop` sequences.
    #[serde(default)]
    pub sequence: BTreeMap<String, SequenceConfig>,
}

/// Validated configuration. Only constructible through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub cli: CliSection,
    pub poll: PollSection,
    pub archive: ArchiveSection,
    pub zosmf: ZosmfSection,
    pub fmp: ServiceSection,
    pub ops: ServiceSection,
    pub maintenance: MaintenanceSection,
    pub ssm: SsmSection,
    pub sequence: BTreeMap<String, SequenceConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile, sequence: BTreeMap<String, SequenceConfig>) -> Self {
        Self {
            cli: raw.cli,
            poll: raw.poll,
            archive: raw.archive,
            zosmf: raw.zosmf,
            fmp: raw.fmp,
            ops: raw.ops,
            maintenance: raw.maintenance,
            ssm: raw.ssm,
            sequence,
        }
    }
}

/// `[cli]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CliSection {
    /// Program every command line starts with.
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    "zowe".to_string()
}

impl Default for CliSection {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

/// `[poll]` section: bounds for resource state polling.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PollSection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
}

fn default_max_attempts() -> u32 {
    30
}

fn default_wait_ms() -> u64 {
    1000
}

impl PollSection {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            wait_ms: default_wait_ms(),
        }
    }
}

/// `[archive]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveSection {
    /// Working directory for the CLI and root for `command-archive/`,
    /// `job-archive/` and `holddata/`.
    #[serde(default = "default_archive_root")]
    pub root: PathBuf,
}

fn default_archive_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            root: default_archive_root(),
        }
    }
}

/// `[zosmf]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ZosmfSection {
    pub port: u16,

    #[serde(default)]
    pub reject_unauthorized: bool,
}

/// `[fmp]` and `[ops]` sections: services reached over their own REST port.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSection {
    pub port: u16,

    #[serde(default)]
    pub reject_unauthorized: bool,

    #[serde(default)]
    pub protocol: Protocol,
}

/// `[maintenance]` section: datasets, JCL members and transfer locations.
#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceSection {
    /// PDS holding the maintenance JCL.
    pub remote_jcl_pds: String,
    pub receive_member: String,
    pub apply_member: String,
    pub apply_check_member: String,
    pub reject_member: String,
    pub restore_member: String,
    pub check_version_member: String,

    /// High-level qualifier of the SMP/E target libraries.
    pub smpe_env: String,
    /// High-level qualifier of the runtime libraries.
    pub runtime_env: String,
    /// Low-level qualifier of the library that receives maintenance.
    pub maintained_pds: String,
    /// Load module whose fix level is verified after apply.
    pub maintained_member: String,
    pub expected_fix_level: String,

    pub local_folder: String,
    pub local_file: String,
    pub server_folder: String,
    pub server_file: String,
    pub remote_folder: String,
    pub remote_file: String,

    pub restart_workflow_name: String,
    pub console_name: String,
}

impl MaintenanceSection {
    /// Fully qualified `<hlq>.<pds>` names.
    pub fn smpe_dataset(&self) -> String {
        format!("{}.{}", self.smpe_env, self.maintained_pds)
    }

    pub fn runtime_dataset(&self) -> String {
        format!("{}.{}", self.runtime_env, self.maintained_pds)
    }

    pub fn jcl_member(&self, member: &str) -> String {
        format!("{}({})", self.remote_jcl_pds, member)
    }
}

/// `[ssm]` section: the two SSM managed resources that are cycled.
#[derive(Debug, Clone, Deserialize)]
pub struct SsmSection {
    pub resource1: String,
    pub resource2: String,
}

/// `[sequence.<name>]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequenceConfig {
    /// Task or sequence names, run in order.
    pub steps: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl SequenceConfig {
    pub fn new(steps: &[&str], description: &str) -> Self {
        Self {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            description: Some(description.to_string()),
        }
    }
}

/// Sequences available without any `[sequence]` table.
pub fn default_sequences() -> BTreeMap<String, SequenceConfig> {
    let mut sequences = BTreeMap::new();
    sequences.insert(
        "reset".to_string(),
        SequenceConfig::new(
            &["reject", "restore", "stop", "copy", "start", "apf"],
            "Reset maintenance level",
        ),
    );
    sequences.insert(
        "start".to_string(),
        SequenceConfig::new(&["start1", "start2"], "Start SSM managed resources"),
    );
    sequences.insert(
        "stop".to_string(),
        SequenceConfig::new(&["stop2", "stop1"], "Stop SSM managed resources"),
    );
    sequences
}
