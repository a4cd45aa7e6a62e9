// src/maintenance/tasks.rs

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::commands::{CommandBuilder, ProfileSpec};
use crate::config::ConfigFile;
use crate::engine::{PipelineRunner, PollSettings, ResourceController, Sleeper, StatePoller, TokioSleeper};
use crate::errors::{MaintError, Result};
use crate::exec::{CommandExecutor, FsArchiveSink, ShellBackend};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{BuiltinTask, Protocol, ResourceState};

use super::fixlevel::find_fix_level;
use super::holddata::{summarize_holddata, HoldActions};
use super::jobs::{parse_job_response, JobResponse};
use super::sequence::expand_plan;

/// Highest acceptable condition code for every maintenance job.
const MAX_RC: u32 = 0;

/// Host credentials for `setup-profiles`.
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// The maintenance workflow: built-in tasks, sequences and profile setup,
/// all driven through one [`CommandExecutor`].
pub struct Maintenance {
    config: ConfigFile,
    executor: CommandExecutor,
    commands: CommandBuilder,
    sleeper: Box<dyn Sleeper>,
    fs: Box<dyn FileSystem>,
}

impl Maintenance {
    pub fn new(
        config: ConfigFile,
        executor: CommandExecutor,
        sleeper: impl Sleeper + 'static,
        fs: impl FileSystem + 'static,
    ) -> Self {
        let commands = CommandBuilder::new(config.cli.program.clone());
        Self {
            config,
            executor,
            commands,
            sleeper: Box::new(sleeper),
            fs: Box::new(fs),
        }
    }

    /// Production wiring: shell backend and archives rooted at
    /// `[archive].root`, real timer sleeps.
    ///
    /// The root doubles as the CLI's working directory, so it is created
    /// here before any command can be launched in it.
    pub fn from_config(config: ConfigFile) -> Result<Self> {
        let root = config.archive.root.clone();
        RealFileSystem.create_dir_all(&root)?;

        let executor = CommandExecutor::new(
            ShellBackend::new(&root),
            FsArchiveSink::new(RealFileSystem, &root),
        );
        Ok(Self::new(config, executor, TokioSleeper, RealFileSystem))
    }

    pub fn resources(&self) -> ResourceController<'_> {
        let poller = StatePoller::new(
            &self.executor,
            &self.commands,
            self.sleeper.as_ref(),
            PollSettings::from(&self.config.poll),
        );
        ResourceController::new(
            &self.executor,
            &self.commands,
            poller,
            &self.config.maintenance.console_name,
        )
    }

    /// Flat list of built-in tasks that `names` expands to.
    pub fn plan<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<BuiltinTask>> {
        expand_plan(&self.config.sequence, names)
    }

    /// Run tasks and sequences one after another, stopping at the first
    /// failure.
    pub async fn run<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let plan = self.plan(names)?;
        let total = plan.len();

        for (step, task) in plan.into_iter().enumerate() {
            info!(task = %task, step, total, "running task");
            self.run_task(task).await?;
        }

        info!(tasks = total, "all tasks finished");
        Ok(())
    }

    pub async fn run_task(&self, task: BuiltinTask) -> Result<()> {
        let m = &self.config.maintenance;
        let ssm = &self.config.ssm;

        match task {
            BuiltinTask::Apf => {
                let dataset = m.runtime_dataset();
                let spec = self.commands.apf_authorize(&dataset, &m.console_name);
                self.executor.execute(&spec).await.map(drop)
            }
            BuiltinTask::Apply => self.submit_member(&m.apply_member, "job-archive/apply").await,
            BuiltinTask::ApplyCheck => {
                self.submit_member(&m.apply_check_member, "job-archive/apply-check")
                    .await
            }
            BuiltinTask::Copy => {
                let spec = self
                    .commands
                    .copy_dataset(&m.smpe_dataset(), &m.runtime_dataset());
                self.executor.execute(&spec).await.map(drop)
            }
            BuiltinTask::Download => {
                let spec = self.commands.download_uss_file(
                    &format!("{}/{}", m.server_folder, m.server_file),
                    &format!("{}/{}", m.local_folder, m.local_file),
                );
                self.executor.execute(&spec).await.map(drop)
            }
            BuiltinTask::Receive => self.receive().await.map(drop),
            BuiltinTask::Reject => self.submit_member(&m.reject_member, "job-archive/reject").await,
            BuiltinTask::RestartWorkflow => {
                let spec = self.commands.start_workflow(&m.restart_workflow_name);
                self.executor.execute(&spec).await.map(drop)
            }
            BuiltinTask::Restore => {
                self.submit_member(&m.restore_member, "job-archive/restore")
                    .await
            }
            BuiltinTask::Start1 => self.change_state(&ssm.resource1, ResourceState::Up).await,
            BuiltinTask::Start2 => self.change_state(&ssm.resource2, ResourceState::Up).await,
            BuiltinTask::Stop1 => self.change_state(&ssm.resource1, ResourceState::Down).await,
            BuiltinTask::Stop2 => self.change_state(&ssm.resource2, ResourceState::Down).await,
            BuiltinTask::Upload => {
                let spec = self.commands.upload_file(
                    &format!("{}/{}", m.local_folder, m.local_file),
                    &format!("{}/{}", m.remote_folder, m.remote_file),
                );
                self.executor.execute(&spec).await.map(drop)
            }
            BuiltinTask::Verify => self.verify().await,
        }
    }

    async fn change_state(&self, resource: &str, state: ResourceState) -> Result<()> {
        self.resources()
            .change_state(resource, state.as_str(), None)
            .await
    }

    async fn submit_member(&self, member: &str, download_dir: &str) -> Result<()> {
        let dataset = self.config.maintenance.jcl_member(member);
        self.submit_job(&dataset, download_dir, MAX_RC).await.map(drop)
    }

    /// Submit `dataset`, download its spool to `download_dir`, and require a
    /// condition code of at most `max_rc`.
    pub async fn submit_job(
        &self,
        dataset: &str,
        download_dir: &str,
        max_rc: u32,
    ) -> Result<JobResponse> {
        let spec = self.commands.submit_job(dataset, download_dir);
        let stdout = self.executor.execute(&spec).await?;
        let job = parse_job_response(&stdout, max_rc)?;
        info!(jobid = %job.jobid, retcode = ?job.retcode, "job completed");
        Ok(job)
    }

    /// Receive maintenance and summarize its HOLDDATA into
    /// `holddata/actions.json`.
    pub async fn receive(&self) -> Result<HoldActions> {
        let m = &self.config.maintenance;
        let download_dir = "job-archive/receive";
        let job = self
            .submit_job(&m.jcl_member(&m.receive_member), download_dir, MAX_RC)
            .await?;

        let report_path = self.spool_path(download_dir, &job.jobid, "SMPEUCL", "SMPRPT");
        let report = self.fs.read_to_string(&report_path)?;
        let actions = summarize_holddata(&report, &m.expected_fix_level);

        let actions_path = self.config.archive.root.join("holddata").join("actions.json");
        let json = serde_json::to_string_pretty(&actions)?;
        self.fs.write(&actions_path, json.as_bytes())?;

        info!(
            remaining_holds = actions.remaining_holds,
            restart = actions.restart,
            review_doc = actions.review_doc,
            path = %actions_path.display(),
            "HOLDDATA summarized"
        );
        Ok(actions)
    }

    /// Run the module-ID job and read `module`'s fix level from its report.
    pub async fn check_fix_level(&self, module: &str) -> Result<Option<String>> {
        let m = &self.config.maintenance;
        let download_dir = "job-archive/version-check";
        let job = self
            .submit_job(&m.jcl_member(&m.check_version_member), download_dir, MAX_RC)
            .await?;

        let report_path = self.spool_path(download_dir, &job.jobid, "SYSVIEW", "SYSPRINT");
        let report = self.fs.read_to_string(&report_path)?;
        find_fix_level(&report, module)
    }

    /// Fail unless the maintained module is at the expected fix level.
    pub async fn verify(&self) -> Result<()> {
        let m = &self.config.maintenance;
        let actual = self.check_fix_level(&m.maintained_member).await?;

        if actual.as_deref() == Some(m.expected_fix_level.as_str()) {
            info!(module = %m.maintained_member, fix_level = %m.expected_fix_level, "fix level verified");
            Ok(())
        } else {
            Err(MaintError::FixLevelMismatch {
                module: m.maintained_member.clone(),
                expected: m.expected_fix_level.clone(),
                actual,
            })
        }
    }

    /// Create the `zosmf`, `fmp` and `ops` profiles and make them default.
    pub async fn setup_profiles(&self, credentials: &Credentials) -> Result<()> {
        let cfg = &self.config;
        let profile = |kind, port, reject_unauthorized, protocol: Option<Protocol>| ProfileSpec {
            kind,
            host: &credentials.host,
            user: &credentials.user,
            password: &credentials.password,
            port,
            reject_unauthorized,
            protocol,
        };

        let queue = vec![
            self.commands.create_profile(&profile(
                "zosmf",
                cfg.zosmf.port,
                cfg.zosmf.reject_unauthorized,
                None,
            )),
            self.commands.set_profile("zosmf"),
            self.commands.create_profile(&profile(
                "fmp",
                cfg.fmp.port,
                cfg.fmp.reject_unauthorized,
                Some(cfg.fmp.protocol),
            )),
            self.commands.set_profile("fmp"),
            self.commands.create_profile(&profile(
                "ops",
                cfg.ops.port,
                cfg.ops.reject_unauthorized,
                Some(cfg.ops.protocol),
            )),
            self.commands.set_profile("ops"),
        ];

        PipelineRunner::new(&self.executor).run_all(queue).await
    }

    /// `<root>/<download_dir>/<jobid>/<step>/<dd>.txt`
    fn spool_path(&self, download_dir: &str, jobid: &str, step: &str, dd: &str) -> PathBuf {
        spool_path(&self.config.archive.root, download_dir, jobid, step, dd)
    }
}

pub fn spool_path(root: &Path, download_dir: &str, jobid: &str, step: &str, dd: &str) -> PathBuf {
    root.join(download_dir)
        .join(jobid)
        .join(step)
        .join(format!("{dd}.txt"))
}
