// src/config/mod.rs

//! Configuration loading and validation for maintflow.
//!
//! - TOML-backed data model (`model.rs`).
//! - Loading from disk (`loader.rs`).
//! - Validation and sequence merging (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    config_path_from_env, default_config_path, load_and_validate, load_from_path, parse_str,
    CONFIG_ENV,
};
pub use model::{
    ArchiveSection, CliSection, ConfigFile, MaintenanceSection, PollSection, RawConfigFile,
    SequenceConfig, ServiceSection, SsmSection, ZosmfSection,
};
