// tests/resource_controller.rs

mod common;
use crate::common::builders::show_resource;
use crate::common::{fake_executor, init_tracing, FakeBackend, RecordingSleeper};

use std::time::Duration;

use maintflow::commands::CommandBuilder;
use maintflow::engine::{PollSettings, ResourceController, StatePoller};
use maintflow::errors::MaintError;
use maintflow::exec::CommandExecutor;

fn controller<'a>(
    executor: &'a CommandExecutor,
    commands: &'a CommandBuilder,
    sleeper: &'a RecordingSleeper,
) -> ResourceController<'a> {
    let poller = StatePoller::new(
        executor,
        commands,
        sleeper,
        PollSettings {
            max_attempts: 3,
            wait: Duration::from_millis(10),
        },
    );
    ResourceController::new(executor, commands, poller, "MAINTCN")
}

#[tokio::test]
async fn start_then_poll_until_up() {
    init_tracing();

    let backend = FakeBackend::new();
    backend
        .on_stdout("show resource RES1", &show_resource("RES1", "DOWN"))
        .on_stdout("show resource RES1", &show_resource("RES1", "UP"));
    let (executor, _fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    controller(&executor, &commands, &sleeper)
        .change_state("RES1", "UP", None)
        .await
        .expect("resource comes up");

    assert_eq!(
        backend.executed(),
        vec![
            "zowe ops start resource RES1",
            "zowe ops show resource RES1",
            "zowe ops show resource RES1",
        ]
    );
}

#[tokio::test]
async fn stop_uses_stop_command() {
    let backend = FakeBackend::new();
    backend.on_stdout("show resource RES2", &show_resource("RES2", "DOWN"));
    let (executor, _fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    controller(&executor, &commands, &sleeper)
        .change_state("RES2", "DOWN", None)
        .await
        .expect("resource goes down");

    assert_eq!(backend.executed()[0], "zowe ops stop resource RES2");
}

#[tokio::test]
async fn invalid_state_dispatches_nothing() {
    let backend = FakeBackend::new();
    let (executor, fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    let err = controller(&executor, &commands, &sleeper)
        .change_state("RES1", "SIDEWAYS", None)
        .await
        .expect_err("unknown state");

    match &err {
        MaintError::ValidationError(state) => assert_eq!(state, "SIDEWAYS"),
        other => panic!("expected ValidationError, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Unrecognized desired state of: SIDEWAYS. Expected UP or DOWN."
    );
    assert!(backend.executed().is_empty());
    assert!(fs.files().is_empty());
}

#[tokio::test]
async fn lowercase_state_is_rejected() {
    let backend = FakeBackend::new();
    let (executor, _fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    let err = controller(&executor, &commands, &sleeper)
        .change_state("RES1", "up", None)
        .await
        .expect_err("states are case-sensitive");

    assert!(matches!(err, MaintError::ValidationError(_)));
    assert!(backend.executed().is_empty());
}

#[tokio::test]
async fn apf_authorizes_after_reaching_state() {
    let backend = FakeBackend::new();
    backend
        .on_stdout("show resource RES1", &show_resource("RES1", "UP"))
        .on_stdout("SETPROG", "CSV410I DSNAME RUN.TIME.LOADLIB ADDED TO APF LIST");
    let (executor, fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    controller(&executor, &commands, &sleeper)
        .change_state("RES1", "UP", Some("RUN.TIME.LOADLIB"))
        .await
        .expect("apf succeeds");

    let executed = backend.executed();
    assert_eq!(executed.len(), 3);
    assert_eq!(
        executed[2],
        "zowe console issue command \"SETPROG APF,ADD,DSNAME=RUN.TIME.LOADLIB,SMS\" --cn MAINTCN"
    );
    assert!(
        fs.files()
            .iter()
            .any(|p| p.starts_with("archive-root/command-archive/apf"))
    );
}

#[tokio::test]
async fn apf_response_without_dataset_fails() {
    let backend = FakeBackend::new();
    backend
        .on_stdout("show resource RES1", &show_resource("RES1", "UP"))
        .on_stdout("SETPROG", "CSV410I DSNAME OTHER.LOADLIB ADDED TO APF LIST");
    let (executor, _fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    let err = controller(&executor, &commands, &sleeper)
        .change_state("RES1", "UP", Some("RUN.TIME.LOADLIB"))
        .await
        .expect_err("dataset not echoed back");

    match err {
        MaintError::VerificationError { missing, .. } => assert_eq!(missing, "RUN.TIME.LOADLIB"),
        other => panic!("expected VerificationError, got {other:?}"),
    }
}

#[tokio::test]
async fn apf_is_skipped_when_polling_times_out() {
    let backend = FakeBackend::new();
    backend.on_stdout("show resource RES1", &show_resource("RES1", "DOWN"));
    let (executor, _fs) = fake_executor(&backend);
    let commands = CommandBuilder::new("zowe");
    let sleeper = RecordingSleeper::new();

    let err = controller(&executor, &commands, &sleeper)
        .change_state("RES1", "UP", Some("RUN.TIME.LOADLIB"))
        .await
        .expect_err("never comes up");

    assert!(matches!(err, MaintError::TimeoutError { .. }));
    assert_eq!(backend.count_matching("SETPROG"), 0);
    assert_eq!(backend.count_matching("show resource"), 3);
}
