use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use maintflow::engine::Sleeper;
use maintflow::exec::{CommandBackend, CommandExecutor, ExecutionResult, FsArchiveSink};
use maintflow::fs::mock::MockFileSystem;

#[derive(Default)]
struct Script {
    needle: String,
    responses: VecDeque<ExecutionResult>,
}

#[derive(Default)]
struct FakeState {
    executed: Vec<String>,
    scripts: Vec<Script>,
}

/// A fake process backend that:
/// - records every command line it is asked to run
/// - answers from per-needle scripts (first script whose needle occurs in
///   the command line wins); the last scripted response repeats
/// - answers an empty successful result when nothing matches.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `result` for command lines containing `needle`.
    pub fn on(&self, needle: &str, result: ExecutionResult) -> &Self {
        let mut state = self.state.lock().unwrap();
        match state.scripts.iter_mut().find(|s| s.needle == needle) {
            Some(script) => script.responses.push_back(result),
            None => state.scripts.push(Script {
                needle: needle.to_string(),
                responses: VecDeque::from([result]),
            }),
        }
        self
    }

    pub fn on_stdout(&self, needle: &str, stdout: &str) -> &Self {
        self.on(needle, ExecutionResult::success(stdout))
    }

    pub fn on_exit_error(&self, needle: &str, message: &str) -> &Self {
        self.on(
            needle,
            ExecutionResult {
                exit_error: Some(message.to_string()),
                ..ExecutionResult::default()
            },
        )
    }

    pub fn on_stderr(&self, needle: &str, stderr: &str) -> &Self {
        self.on(
            needle,
            ExecutionResult {
                stderr: stderr.to_string(),
                ..ExecutionResult::default()
            },
        )
    }

    /// Command lines run so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn count_matching(&self, needle: &str) -> usize {
        self.executed().iter().filter(|c| c.contains(needle)).count()
    }

    fn respond(&self, command_line: &str) -> ExecutionResult {
        let mut state = self.state.lock().unwrap();
        state.executed.push(command_line.to_string());

        let Some(script) = state
            .scripts
            .iter_mut()
            .find(|s| command_line.contains(&s.needle))
        else {
            return ExecutionResult::default();
        };

        if script.responses.len() > 1 {
            script.responses.pop_front().unwrap_or_default()
        } else {
            script.responses.front().cloned().unwrap_or_default()
        }
    }
}

impl CommandBackend for FakeBackend {
    fn run<'a>(
        &'a self,
        command_line: &'a str,
    ) -> Pin<Box<dyn Future<Output = ExecutionResult> + Send + 'a>> {
        let result = self.respond(command_line);
        Box::pin(async move { result })
    }
}

/// Sleeper that returns immediately and records the requested delays.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.slept.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}

/// Executor over `backend` that archives into an in-memory file system
/// rooted at `archive-root`.
pub fn fake_executor(backend: &FakeBackend) -> (CommandExecutor, MockFileSystem) {
    let fs = MockFileSystem::new();
    let sink = FsArchiveSink::new(fs.clone(), "archive-root");
    (CommandExecutor::new(backend.clone(), sink), fs)
}
