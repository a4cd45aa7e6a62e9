// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod maintenance;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{default_config_path, load_and_validate, ConfigFile};
use crate::maintenance::{expand_plan, Credentials, Maintenance};
use crate::types::BuiltinTask;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the config, then dispatches the subcommand.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.map(PathBuf::from).unwrap_or_else(default_config_path);
    let cfg = load_and_validate(&config_path)?;
    debug!(config = %config_path.display(), "configuration loaded");

    match args.command {
        Command::List => {
            print_task_list(&cfg);
            Ok(())
        }
        Command::Run { names, dry_run } => {
            if dry_run {
                // Plan only: no backend, no archive root.
                let plan = expand_plan(&cfg.sequence, names.as_slice())?;
                print_plan(&names, &plan);
                return Ok(());
            }
            let maintenance = Maintenance::from_config(cfg)?;
            maintenance.run(names.as_slice()).await?;
            Ok(())
        }
        Command::SetupProfiles {
            host,
            user,
            password,
        } => {
            let maintenance = Maintenance::from_config(cfg)?;
            let credentials = Credentials {
                host,
                user,
                password,
            };
            maintenance.setup_profiles(&credentials).await?;
            Ok(())
        }
    }
}

fn print_task_list(cfg: &ConfigFile) {
    println!("tasks:");
    for task in BuiltinTask::ALL {
        println!("  {:<18} {}", task.name(), task.description());
    }
    println!();

    println!("sequences:");
    for (name, seq) in cfg.sequence.iter() {
        let description = seq.description.as_deref().unwrap_or("");
        println!("  {:<18} {}", name, description);
        println!("      steps: {}", seq.steps.join(", "));
    }
}

fn print_plan(names: &[String], plan: &[BuiltinTask]) {
    println!("maintflow dry-run: {}", names.join(" "));
    for (i, task) in plan.iter().enumerate() {
        println!("  {}. {:<18} {}", i + 1, task.name(), task.description());
    }
    debug!("dry-run complete (no execution)");
}
