// tests/shell_backend.rs
//
// These spawn real processes through `sh`.
#![cfg(unix)]

mod common;
use crate::common::builders::ConfigFileBuilder;

use maintflow::maintenance::Maintenance;
use maintflow::exec::{CommandBackend, CommandExecutor, CommandSpec, FsArchiveSink, ShellBackend};
use maintflow::errors::MaintError;
use maintflow::fs::RealFileSystem;

#[tokio::test]
async fn captures_stdout_and_stderr() {
    let tmp = tempfile::tempdir().unwrap();
    let backend = ShellBackend::new(tmp.path());

    let result = backend.run("echo out; echo err 1>&2").await;

    assert_eq!(result.exit_error, None);
    assert_eq!(result.stdout, "out\n");
    assert_eq!(result.stderr, "err\n");
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_code() {
    let tmp = tempfile::tempdir().unwrap();
    let backend = ShellBackend::new(tmp.path());

    let result = backend.run("exit 3").await;

    assert_eq!(
        result.exit_error.as_deref(),
        Some("Command failed with exit code 3")
    );
}

#[tokio::test]
async fn runs_in_the_working_directory() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("marker.txt"), "here").unwrap();
    let backend = ShellBackend::new(tmp.path());

    let result = backend.run("cat marker.txt").await;

    assert_eq!(result.stdout, "here");
}

#[tokio::test]
async fn executor_archives_real_process_output() {
    let tmp = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::new(
        ShellBackend::new(tmp.path()),
        FsArchiveSink::new(RealFileSystem, tmp.path()),
    );

    let err = executor
        .execute(&CommandSpec::new("echo partial; exit 2", "command-archive/real"))
        .await
        .expect_err("exit 2");
    assert!(matches!(err, MaintError::ExitError { .. }));

    let dir = tmp.path().join("command-archive/real");
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let record = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
    assert_eq!(
        record,
        "Error:\nCommand failed with exit code 2\nStdErr:\n\nData:\npartial\n"
    );
}

#[tokio::test]
async fn fresh_archive_root_is_created_before_the_first_command() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("fresh-archive").join("nested");
    let config = ConfigFileBuilder::new()
        .with_program("echo")
        .with_archive_root(root.to_str().unwrap())
        .build();

    let maintenance = Maintenance::from_config(config).expect("root is created");
    assert!(root.is_dir());

    maintenance
        .run(&["copy"])
        .await
        .expect("first command runs inside the new root");

    let archived: Vec<_> = std::fs::read_dir(root.join("command-archive/copy"))
        .unwrap()
        .collect();
    assert_eq!(archived.len(), 1);
}
