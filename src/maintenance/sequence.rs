// src/maintenance/sequence.rs

use std::collections::BTreeMap;

use crate::config::SequenceConfig;
use crate::errors::{MaintError, Result};
use crate::types::BuiltinTask;

/// Expand task and sequence names into the flat, ordered list of built-in
/// tasks to run. Nested sequences expand depth-first in declaration order.
pub fn expand_plan<S: AsRef<str>>(
    sequences: &BTreeMap<String, SequenceConfig>,
    names: &[S],
) -> Result<Vec<BuiltinTask>> {
    let mut plan = Vec::new();
    let mut stack = Vec::new();
    for name in names {
        expand_into(sequences, name.as_ref(), &mut stack, &mut plan)?;
    }
    Ok(plan)
}

fn expand_into<'a>(
    sequences: &'a BTreeMap<String, SequenceConfig>,
    name: &'a str,
    stack: &mut Vec<&'a str>,
    plan: &mut Vec<BuiltinTask>,
) -> Result<()> {
    if let Ok(task) = name.parse::<BuiltinTask>() {
        plan.push(task);
        return Ok(());
    }

    let seq = sequences
        .get(name)
        .ok_or_else(|| MaintError::TaskNotFound(name.to_string()))?;

    // Only reachable with an unvalidated sequence map.
    if stack.contains(&name) {
        return Err(MaintError::SequenceCycle(format!(
            "sequence '{name}' eventually runs itself"
        )));
    }

    stack.push(name);
    for step in &seq.steps {
        expand_into(sequences, step, stack, plan)?;
    }
    stack.pop();
    Ok(())
}
