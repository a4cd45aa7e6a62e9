// src/commands.rs

//! Command-line construction for the external CLI.
//!
//! Lines are passed to the shell as-is; nothing here quotes or escapes
//! values beyond the literal quotes the CLI grammar expects.

use crate::exec::CommandSpec;
use crate::types::Protocol;

pub const SHOW_RESOURCE_DIR: &str = "command-archive/show-resource";
pub const START_RESOURCE_DIR: &str = "command-archive/start-resource";
pub const STOP_RESOURCE_DIR: &str = "command-archive/stop-resource";
pub const APF_DIR: &str = "command-archive/apf";
pub const JOB_SUBMISSION_DIR: &str = "command-archive/job-submission";

/// Name of the CLI profiles created by `setup-profiles`.
pub const PROFILE_NAME: &str = "zw";

/// Connection settings for one `profiles create` call.
#[derive(Debug, Clone)]
pub struct ProfileSpec<'a> {
    pub kind: &'a str,
    pub host: &'a str,
    pub user: &'a str,
    pub password: &'a str,
    pub port: u16,
    pub reject_unauthorized: bool,
    pub protocol: Option<Protocol>,
}

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn show_resource(&self, resource: &str) -> CommandSpec {
        CommandSpec::new(
            format!("{} ops show resource {resource}", self.program),
            SHOW_RESOURCE_DIR,
        )
    }

    pub fn start_resource(&self, resource: &str) -> CommandSpec {
        CommandSpec::new(
            format!("{} ops start resource {resource}", self.program),
            START_RESOURCE_DIR,
        )
    }

    pub fn stop_resource(&self, resource: &str) -> CommandSpec {
        CommandSpec::new(
            format!("{} ops stop resource {resource}", self.program),
            STOP_RESOURCE_DIR,
        )
    }

    /// `SETPROG APF,ADD` for `dataset`; success requires `CSV410I` and the
    /// dataset name in the console response.
    pub fn apf_authorize(&self, dataset: &str, console: &str) -> CommandSpec {
        CommandSpec::new(
            format!(
                "{} console issue command \"SETPROG APF,ADD,DSNAME={dataset},SMS\" --cn {console}",
                self.program
            ),
            APF_DIR,
        )
        .expecting(["CSV410I", dataset])
    }

    pub fn submit_job(&self, dataset: &str, download_dir: &str) -> CommandSpec {
        CommandSpec::new(
            format!(
                "{} jobs submit data-set \"{dataset}\" -d {download_dir} --rfj",
                self.program
            ),
            JOB_SUBMISSION_DIR,
        )
    }

    pub fn copy_dataset(&self, from: &str, to: &str) -> CommandSpec {
        CommandSpec::new(
            format!(
                "{} file-master-plus copy data-set \"{from}\" \"{to}\" --rfj",
                self.program
            ),
            "command-archive/copy",
        )
    }

    pub fn download_uss_file(&self, remote: &str, local: &str) -> CommandSpec {
        CommandSpec::new(
            format!(
                "{} files download uf \"{remote}\" -f \"{local}\" -b --rfj",
                self.program
            ),
            "command-archive/download",
        )
    }

    pub fn upload_file(&self, local: &str, remote: &str) -> CommandSpec {
        CommandSpec::new(
            format!(
                "{} files upload ftu \"{local}\" \"{remote}\" -b --rfj",
                self.program
            ),
            "command-archive/upload",
        )
    }

    pub fn start_workflow(&self, workflow_name: &str) -> CommandSpec {
        CommandSpec::new(
            format!(
                "{} zos-workflows start workflow-full --workflow-name {workflow_name} --wait",
                self.program
            ),
            "command-archive/start-workflow",
        )
    }

    pub fn create_profile(&self, spec: &ProfileSpec<'_>) -> CommandSpec {
        let mut line = format!(
            "{} profiles create {} {PROFILE_NAME} --host {} --user {} --pass {} --port {} --ru {}",
            self.program,
            spec.kind,
            spec.host,
            spec.user,
            spec.password,
            spec.port,
            spec.reject_unauthorized
        );
        if let Some(protocol) = spec.protocol {
            line.push_str(&format!(" --protocol {protocol}"));
        }
        line.push_str(" --ow");
        CommandSpec::new(line, format!("command-archive/create-{}-profile", spec.kind))
    }

    pub fn set_profile(&self, kind: &str) -> CommandSpec {
        CommandSpec::new(
            format!("{} profiles set {kind} {PROFILE_NAME}", self.program),
            format!("command-archive/set-{kind}-profile"),
        )
    }
}
