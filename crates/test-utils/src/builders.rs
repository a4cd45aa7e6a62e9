#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use maintflow::config::{
    ArchiveSection, CliSection, ConfigFile, MaintenanceSection, PollSection, RawConfigFile,
    SequenceConfig, ServiceSection, SsmSection, ZosmfSection,
};
use maintflow::errors::Result;
use maintflow::types::Protocol;

/// A complete config file, as an operator would write it.
pub const SAMPLE_TOML: &str = r#"
[cli]
program = "zowe"

[poll]
max_attempts = 5
wait_ms = 10

[zosmf]
port = 443
reject_unauthorized = false

[fmp]
port = 6001
protocol = "https"

[ops]
port = 7001
protocol = "http"
reject_unauthorized = true

[maintenance]
remote_jcl_pds = "MAINT.JCL"
receive_member = "RECEIVE"
apply_member = "APPLY"
apply_check_member = "APPLYCK"
reject_member = "REJECT"
restore_member = "RESTORE"
check_version_member = "MODID"
smpe_env = "SMPE.TARGET"
runtime_env = "RUN.TIME"
maintained_pds = "LOADLIB"
maintained_member = "GSVXMOD"
expected_fix_level = "SO12345"
local_folder = "maintenance"
local_file = "SO12345.bin"
server_folder = "/ftp/pub"
server_file = "SO12345.bin"
remote_folder = "/u/maint"
remote_file = "SO12345.bin"
restart_workflow_name = "restart-sysview"
console_name = "MAINTCN"

[ssm]
resource1 = "RES1"
resource2 = "RES2"
"#;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                cli: CliSection::default(),
                poll: PollSection {
                    max_attempts: 3,
                    wait_ms: 0,
                },
                archive: ArchiveSection {
                    root: PathBuf::from("archive-root"),
                },
                zosmf: ZosmfSection {
                    port: 443,
                    reject_unauthorized: false,
                },
                fmp: ServiceSection {
                    port: 6001,
                    reject_unauthorized: false,
                    protocol: Protocol::Https,
                },
                ops: ServiceSection {
                    port: 7001,
                    reject_unauthorized: true,
                    protocol: Protocol::Http,
                },
                maintenance: sample_maintenance(),
                ssm: SsmSection {
                    resource1: "RES1".to_string(),
                    resource2: "RES2".to_string(),
                },
                sequence: BTreeMap::new(),
            },
        }
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.config.cli.program = program.to_string();
        self
    }

    pub fn with_poll(mut self, max_attempts: u32, wait_ms: u64) -> Self {
        self.config.poll = PollSection {
            max_attempts,
            wait_ms,
        };
        self
    }

    pub fn with_archive_root(mut self, root: &str) -> Self {
        self.config.archive.root = PathBuf::from(root);
        self
    }

    pub fn with_sequence(mut self, name: &str, steps: &[&str]) -> Self {
        self.config.sequence.insert(
            name.to_string(),
            SequenceConfig {
                steps: steps.iter().map(|s| s.to_string()).collect(),
                description: None,
            },
        );
        self
    }

    pub fn with_maintenance(mut self, f: impl FnOnce(&mut MaintenanceSection)) -> Self {
        f(&mut self.config.maintenance);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        self.try_build()
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_maintenance() -> MaintenanceSection {
    MaintenanceSection {
        remote_jcl_pds: "MAINT.JCL".to_string(),
        receive_member: "RECEIVE".to_string(),
        apply_member: "APPLY".to_string(),
        apply_check_member: "APPLYCK".to_string(),
        reject_member: "REJECT".to_string(),
        restore_member: "RESTORE".to_string(),
        check_version_member: "MODID".to_string(),
        smpe_env: "SMPE.TARGET".to_string(),
        runtime_env: "RUN.TIME".to_string(),
        maintained_pds: "LOADLIB".to_string(),
        maintained_member: "GSVXMOD".to_string(),
        expected_fix_level: "SO12345".to_string(),
        local_folder: "maintenance".to_string(),
        local_file: "SO12345.bin".to_string(),
        server_folder: "/ftp/pub".to_string(),
        server_file: "SO12345.bin".to_string(),
        remote_folder: "/u/maint".to_string(),
        remote_file: "SO12345.bin".to_string(),
        restart_workflow_name: "restart-sysview".to_string(),
        console_name: "MAINTCN".to_string(),
    }
}

/// `--rfj` output of a completed job.
pub fn job_json(jobid: &str, retcode: Option<&str>) -> String {
    let retcode = match retcode {
        Some(rc) => format!("\"{rc}\""),
        None => "null".to_string(),
    };
    format!(
        r#"{{"success": true, "exitCode": 0, "data": {{"jobid": "{jobid}", "jobname": "MAINTJOB", "status": "OUTPUT", "retcode": {retcode}}}}}"#
    )
}

/// Show-resource output reporting `state`.
pub fn show_resource(resource: &str, state: &str) -> String {
    format!("name: {resource}\ncurrent: {state}\ndesired: {state}\n")
}
