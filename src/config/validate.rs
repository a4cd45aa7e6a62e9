// src/config/validate.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{default_sequences, ConfigFile, RawConfigFile, SequenceConfig};
use crate::errors::{MaintError, Result};
use crate::types::BuiltinTask;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = MaintError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let sequences = merge_sequences(&raw.sequence);
        validate_raw_config(&raw)?;
        validate_sequences(&sequences)?;
        Ok(ConfigFile::new_unchecked(raw, sequences))
    }
}

/// User-defined sequences replace built-in ones of the same name.
fn merge_sequences(user: &BTreeMap<String, SequenceConfig>) -> BTreeMap<String, SequenceConfig> {
    let mut merged = default_sequences();
    for (name, seq) in user {
        merged.insert(name.clone(), seq.clone());
    }
    merged
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.cli.program.trim().is_empty() {
        return Err(MaintError::ConfigError(
            "[cli].program must not be empty".to_string(),
        ));
    }

    if cfg.poll.max_attempts == 0 {
        return Err(MaintError::ConfigError(
            "[poll].max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }

    for (section, port) in [
        ("zosmf", cfg.zosmf.port),
        ("fmp", cfg.fmp.port),
        ("ops", cfg.ops.port),
    ] {
        if port == 0 {
            return Err(MaintError::ConfigError(format!(
                "[{section}].port must be non-zero"
            )));
        }
    }

    let m = &cfg.maintenance;
    let required = [
        ("remote_jcl_pds", &m.remote_jcl_pds),
        ("receive_member", &m.receive_member),
        ("apply_member", &m.apply_member),
        ("apply_check_member", &m.apply_check_member),
        ("reject_member", &m.reject_member),
        ("restore_member", &m.restore_member),
        ("check_version_member", &m.check_version_member),
        ("smpe_env", &m.smpe_env),
        ("runtime_env", &m.runtime_env),
        ("maintained_pds", &m.maintained_pds),
        ("maintained_member", &m.maintained_member),
        ("expected_fix_level", &m.expected_fix_level),
        ("console_name", &m.console_name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(MaintError::ConfigError(format!(
                "[maintenance].{field} must not be empty"
            )));
        }
    }

    if cfg.ssm.resource1.trim().is_empty() || cfg.ssm.resource2.trim().is_empty() {
        return Err(MaintError::ConfigError(
            "[ssm].resource1 and [ssm].resource2 must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_sequences(sequences: &BTreeMap<String, SequenceConfig>) -> Result<()> {
    for (name, seq) in sequences {
        if name.parse::<BuiltinTask>().is_ok() {
            return Err(MaintError::ConfigError(format!(
                "sequence '{name}' shadows the built-in task of the same name"
            )));
        }
        if seq.steps.is_empty() {
            return Err(MaintError::ConfigError(format!(
                "sequence '{name}' has no steps"
            )));
        }
        for step in &seq.steps {
            if step == name {
                return Err(MaintError::ConfigError(format!(
                    "sequence '{name}' cannot contain itself"
                )));
            }
            if step.parse::<BuiltinTask>().is_err() && !sequences.contains_key(step) {
                return Err(MaintError::ConfigError(format!(
                    "sequence '{name}' has unknown step '{step}'"
                )));
            }
        }
    }

    // Edge direction: sequence -> nested sequence it runs.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for name in sequences.keys() {
        graph.add_node(name.as_str());
    }
    for (name, seq) in sequences {
        for step in &seq.steps {
            if sequences.contains_key(step) {
                graph.add_edge(name.as_str(), step.as_str(), ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(MaintError::SequenceCycle(format!(
            "sequence '{}' eventually runs itself",
            cycle.node_id()
        ))),
    }
}
