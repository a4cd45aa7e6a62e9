// tests/report_parsing.rs

mod common;
use crate::common::builders::job_json;

use maintflow::errors::MaintError;
use maintflow::maintenance::{
    find_fix_level, parse_condition_code, parse_job_response, summarize_holddata, HoldActions,
};

const MODULE_REPORT: &str = "\
SYSVIEW MODID report for RUN.TIME.LOADLIB
____ Name     TTR    Alias-Of IdName   Release  Bld FixLevel AsmDate
____ GSVXMOD  000A12          GSVXMOD  17.0     01  SO12345  2024/01/05
____ GSVXAPI  000B01          GSVXAPI  17.0     01           2023/11/30
";

#[test]
fn condition_code_parsing() {
    assert_eq!(parse_condition_code("CC 0000"), Some(0));
    assert_eq!(parse_condition_code("CC 0004"), Some(4));
    assert_eq!(parse_condition_code("ABEND S0C4"), None);
    assert_eq!(parse_condition_code("JCL ERROR"), None);
    assert_eq!(parse_condition_code("CC"), None);
}

#[test]
fn job_with_cc_zero_is_accepted() {
    let job = parse_job_response(&job_json("JOB00042", Some("CC 0000")), 0).expect("rc 0");
    assert_eq!(job.jobid, "JOB00042");
    assert_eq!(job.retcode.as_deref(), Some("CC 0000"));
}

#[test]
fn job_above_max_rc_fails_with_diagnostics() {
    match parse_job_response(&job_json("JOB00043", Some("CC 0008")), 4) {
        Err(MaintError::JobFailed(diagnostics)) => {
            assert!(diagnostics.contains("JOB00043"));
            assert!(diagnostics.contains("CC 0008"));
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
}

#[test]
fn abended_or_missing_retcode_fails() {
    assert!(matches!(
        parse_job_response(&job_json("JOB1", Some("ABEND S222")), 0),
        Err(MaintError::JobFailed(_))
    ));
    assert!(matches!(
        parse_job_response(&job_json("JOB2", None), 0),
        Err(MaintError::JobFailed(_))
    ));
}

#[test]
fn non_json_job_output_is_a_json_error() {
    assert!(matches!(
        parse_job_response("Submitted JOB00001", 0),
        Err(MaintError::JsonError(_))
    ));
}

#[test]
fn holddata_classification() {
    let report = "\
SMP/E RECEIVE SUMMARY
++HOLD (SO12345) SYSTEM FMID(CGV0H00) REASON (DOC    ) DATE(24005)
  COMMENT (UPDATE THE USER GUIDE).
++HOLD (SO12345) SYSTEM FMID(CGV0H00) REASON (RESTART) DATE(24005)
  COMMENT (RECYCLE THE ADDRESS SPACE).
";
    let actions = summarize_holddata(report, "SO12345");
    assert_eq!(
        actions,
        HoldActions {
            remaining_holds: false,
            restart: true,
            review_doc: true,
        }
    );
}

#[test]
fn holddata_other_reasons_are_remaining_holds() {
    let report = "++HOLD (SO12345) ERROR FMID(CGV0H00) REASON (AO12345)\n";
    let actions = summarize_holddata(report, "SO12345");
    assert!(actions.remaining_holds);
    assert!(!actions.restart);
    assert!(!actions.review_doc);
}

#[test]
fn holddata_for_other_fixes_is_ignored() {
    let report = "++HOLD (SO99999) SYSTEM REASON (RESTART)\n";
    assert_eq!(summarize_holddata(report, "SO12345"), HoldActions::default());
}

#[test]
fn hold_actions_serialize_in_camel_case() {
    let json = serde_json::to_value(HoldActions {
        remaining_holds: true,
        restart: false,
        review_doc: true,
    })
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({"remainingHolds": true, "restart": false, "reviewDoc": true})
    );
}

#[test]
fn fix_level_is_read_from_its_column() {
    assert_eq!(
        find_fix_level(MODULE_REPORT, "GSVXMOD").unwrap().as_deref(),
        Some("SO12345")
    );
}

#[test]
fn blank_fix_level_cell_is_empty() {
    assert_eq!(
        find_fix_level(MODULE_REPORT, "GSVXAPI").unwrap().as_deref(),
        Some("")
    );
}

#[test]
fn unknown_module_has_no_fix_level() {
    assert_eq!(find_fix_level(MODULE_REPORT, "NOSUCH").unwrap(), None);
}

#[test]
fn report_without_header_is_a_format_error() {
    let result = find_fix_level("____ GSVXMOD 000A12 SO12345\n", "GSVXMOD");
    assert!(matches!(result, Err(MaintError::ReportFormat(_))));
}
