// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `maintflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "maintflow",
    version,
    about = "Receive, apply and verify mainframe maintenance through an external CLI.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `MAINTFLOW_CONFIG`, else `maintflow.toml` in the current
    /// working directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MAINTFLOW_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run tasks or sequences in order, stopping at the first failure.
    Run {
        /// Task or sequence names (see `list`).
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,

        /// Print the expanded plan without executing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// List built-in tasks and configured sequences.
    List,

    /// Create the CLI profiles for this project and set them as default.
    SetupProfiles {
        /// Host name or IP address.
        #[arg(long, env = "MAINTFLOW_HOST")]
        host: String,

        #[arg(long, env = "MAINTFLOW_USER")]
        user: String,

        #[arg(long, env = "MAINTFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
