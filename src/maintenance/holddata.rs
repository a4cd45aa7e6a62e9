// src/maintenance/holddata.rs

use serde::{Deserialize, Serialize};

/// What the operator has to do before or after applying, derived from the
/// `++HOLD` statements in the SMP/E receive report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldActions {
    /// Holds that are neither documentation nor restart holds.
    pub remaining_holds: bool,
    pub restart: bool,
    pub review_doc: bool,
}

/// Classify every `++HOLD (<fix_level>)` block in `report`.
///
/// A block mentioning `REASON (DOC    )` only asks for documentation review;
/// `REASON (RESTART)` asks for a restart; anything else is left for a human.
pub fn summarize_holddata(report: &str, fix_level: &str) -> HoldActions {
    let marker = format!("++HOLD ({fix_level})");
    let mut actions = HoldActions::default();

    for hold in report.split(marker.as_str()).skip(1) {
        if hold.contains("REASON (DOC    )") {
            actions.review_doc = true;
        } else if hold.contains("REASON (RESTART)") {
            actions.restart = true;
        } else {
            actions.remaining_holds = true;
        }
    }

    actions
}
