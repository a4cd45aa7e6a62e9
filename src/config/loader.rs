// src/config/loader.rs

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read and deserialize a config file without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

pub fn parse_str(contents: &str) -> Result<RawConfigFile> {
    let config: RawConfigFile = toml::from_str(contents)?;
    Ok(config)
}

/// Load a configuration file and validate it.
///
/// - Reads TOML; missing optional sections take their defaults.
/// - Merges `[sequence.*]` over the built-in sequences.
/// - Rejects empty required names, zero ports, unknown or cyclic sequences.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

pub const CONFIG_ENV: &str = "MAINTFLOW_CONFIG";

/// `MAINTFLOW_CONFIG` if set, otherwise `maintflow.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    config_path_from_env(std::env::var_os(CONFIG_ENV))
}

/// Resolve the config path from the raw value of `MAINTFLOW_CONFIG`. An
/// empty value counts as unset.
pub fn config_path_from_env(value: Option<OsString>) -> PathBuf {
    value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("maintflow.toml"))
}
