// tests/config_validation.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, SAMPLE_TOML};

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use maintflow::config::{load_and_validate, parse_str, ConfigFile};
use maintflow::errors::MaintError;
use maintflow::types::Protocol;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn sample_config_loads_with_builtin_sequences() {
    let file = write_config(SAMPLE_TOML);
    let cfg = load_and_validate(file.path()).expect("sample config is valid");

    assert_eq!(cfg.cli.program, "zowe");
    assert_eq!(cfg.poll.max_attempts, 5);
    assert_eq!(cfg.poll.wait(), Duration::from_millis(10));
    assert_eq!(cfg.archive.root, PathBuf::from("."));
    assert_eq!(cfg.fmp.protocol, Protocol::Https);
    assert_eq!(cfg.ops.protocol, Protocol::Http);
    assert!(cfg.ops.reject_unauthorized);
    assert!(!cfg.zosmf.reject_unauthorized);

    assert_eq!(
        cfg.sequence["reset"].steps,
        vec!["reject", "restore", "stop", "copy", "start", "apf"]
    );
    assert_eq!(cfg.sequence["start"].steps, vec!["start1", "start2"]);
    assert_eq!(cfg.sequence["stop"].steps, vec!["stop2", "stop1"]);
}

#[test]
fn poll_section_defaults() {
    let toml = SAMPLE_TOML.replace("[poll]\nmax_attempts = 5\nwait_ms = 10\n", "");
    let cfg = ConfigFile::try_from(parse_str(&toml).unwrap()).unwrap();

    assert_eq!(cfg.poll.max_attempts, 30);
    assert_eq!(cfg.poll.wait(), Duration::from_millis(1000));
}

#[test]
fn missing_required_section_is_a_toml_error() {
    let toml = SAMPLE_TOML.replace("[ssm]\nresource1 = \"RES1\"\nresource2 = \"RES2\"\n", "");
    let file = write_config(&toml);

    match load_and_validate(file.path()) {
        Err(MaintError::TomlError(e)) => assert!(e.to_string().contains("ssm")),
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn unknown_protocol_is_rejected_while_parsing() {
    let toml = SAMPLE_TOML.replace("protocol = \"http\"", "protocol = \"gopher\"");
    assert!(matches!(parse_str(&toml), Err(MaintError::TomlError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/maintflow.toml");
    assert!(matches!(result, Err(MaintError::IoError(_))));
}

#[test]
fn zero_max_attempts_is_rejected() {
    match ConfigFileBuilder::new().with_poll(0, 10).try_build() {
        Err(MaintError::ConfigError(msg)) => assert!(msg.contains("max_attempts")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn empty_program_is_rejected() {
    let result = ConfigFileBuilder::new().with_program("  ").try_build();
    assert!(matches!(result, Err(MaintError::ConfigError(_))));
}

#[test]
fn empty_required_maintenance_field_is_rejected() {
    let result = ConfigFileBuilder::new()
        .with_maintenance(|m| m.console_name.clear())
        .try_build();

    match result {
        Err(MaintError::ConfigError(msg)) => assert!(msg.contains("console_name")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn user_sequence_overrides_builtin() {
    let cfg = ConfigFileBuilder::new()
        .with_sequence("start", &["start1"])
        .with_sequence("full", &["download", "upload", "receive", "apply-check", "apply"])
        .build();

    assert_eq!(cfg.sequence["start"].steps, vec!["start1"]);
    assert_eq!(cfg.sequence["full"].steps.len(), 5);
    assert!(cfg.sequence.contains_key("reset"));
}

#[test]
fn sequence_with_unknown_step_is_rejected() {
    match ConfigFileBuilder::new()
        .with_sequence("broken", &["download", "frobnicate"])
        .try_build()
    {
        Err(MaintError::ConfigError(msg)) => {
            assert!(msg.contains("broken"));
            assert!(msg.contains("frobnicate"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn sequence_shadowing_builtin_task_is_rejected() {
    let result = ConfigFileBuilder::new()
        .with_sequence("apply", &["apply-check"])
        .try_build();
    assert!(matches!(result, Err(MaintError::ConfigError(_))));
}

#[test]
fn empty_sequence_is_rejected() {
    let result = ConfigFileBuilder::new().with_sequence("nothing", &[]).try_build();
    assert!(matches!(result, Err(MaintError::ConfigError(_))));
}

#[test]
fn self_referencing_sequence_is_rejected() {
    let result = ConfigFileBuilder::new()
        .with_sequence("loop", &["apf", "loop"])
        .try_build();
    assert!(matches!(result, Err(MaintError::ConfigError(_))));
}

#[test]
fn sequence_cycle_is_a_structured_error() {
    let file = write_config(&format!(
        r#"{SAMPLE_TOML}
[sequence.a]
steps = ["apf", "b"]

[sequence.b]
steps = ["a"]
"#
    ));

    match load_and_validate(file.path()) {
        Err(MaintError::SequenceCycle(msg)) => {
            assert!(msg.contains('a') || msg.contains('b'));
        }
        other => panic!("expected SequenceCycle, got {other:?}"),
    }
}

#[test]
fn zero_port_is_rejected() {
    let toml = SAMPLE_TOML.replace("port = 6001", "port = 0");
    match ConfigFile::try_from(parse_str(&toml).unwrap()) {
        Err(MaintError::ConfigError(msg)) => assert!(msg.contains("fmp")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}
