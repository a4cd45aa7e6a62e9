#![allow(dead_code)]

pub use maintflow_test_utils::builders;
pub use maintflow_test_utils::{fake_executor, init_tracing, FakeBackend, RecordingSleeper};

use maintflow::config::ConfigFile;
use maintflow::fs::mock::MockFileSystem;
use maintflow::maintenance::Maintenance;

/// Maintenance workflow over a scripted backend. Archives, downloaded spool
/// and `holddata/` all live in the returned in-memory file system.
pub fn fake_maintenance(
    config: ConfigFile,
    backend: &FakeBackend,
) -> (Maintenance, MockFileSystem, RecordingSleeper) {
    let (executor, fs) = fake_executor(backend);
    let sleeper = RecordingSleeper::new();
    let maintenance = Maintenance::new(config, executor, sleeper.clone(), fs.clone());
    (maintenance, fs, sleeper)
}
