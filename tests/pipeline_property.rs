// tests/pipeline_property.rs

mod common;
use crate::common::{fake_executor, FakeBackend};

use maintflow::engine::PipelineRunner;
use maintflow::exec::CommandSpec;
use proptest::prelude::*;

fn run_pipeline(len: usize, failing: Option<usize>) -> (bool, Vec<String>) {
    let backend = FakeBackend::new();
    if let Some(k) = failing {
        backend.on_exit_error(&format!("step-{k};"), "failed");
    }
    let (executor, _fs) = fake_executor(&backend);

    // Trailing ';' keeps "step-1;" from matching "step-10;".
    let queue: Vec<CommandSpec> = (0..len)
        .map(|i| CommandSpec::new(format!("run step-{i};"), "command-archive/prop"))
        .collect();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let ok = rt
        .block_on(PipelineRunner::new(&executor).run_all(queue))
        .is_ok();
    (ok, backend.executed())
}

proptest! {
    #[test]
    fn runs_exactly_the_prefix_up_to_the_failure(
        (len, failing) in (1usize..20).prop_flat_map(|len| (Just(len), proptest::option::of(0..len)))
    ) {
        let (ok, executed) = run_pipeline(len, failing);

        let expected_runs = match failing {
            Some(k) => k + 1,
            None => len,
        };
        prop_assert_eq!(ok, failing.is_none());
        prop_assert_eq!(executed.len(), expected_runs);
        for (i, cmd) in executed.iter().enumerate() {
            prop_assert_eq!(cmd, &format!("run step-{i};"));
        }
    }
}
