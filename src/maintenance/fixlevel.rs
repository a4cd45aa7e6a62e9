// src/maintenance/fixlevel.rs

use regex::Regex;

use crate::errors::{MaintError, Result};

/// Read `module`'s fix level from a module-ID report.
///
/// The report is a fixed-width table whose header row contains `Name` and
/// then `FixLevel`; module rows start with `____ <name>`. Cells may be blank,
/// so the value is taken at the header's `FixLevel` column up to the next
/// space rather than by splitting the row into fields.
///
/// Returns `Ok(None)` when the module has no row.
pub fn find_fix_level(report: &str, module: &str) -> Result<Option<String>> {
    let header_re = Regex::new(r"(?m)^.*Name.*FixLevel.*$")?;
    let header = header_re
        .find(report)
        .ok_or_else(|| MaintError::ReportFormat("no header row with a FixLevel column".to_string()))?;
    let column = header.as_str().find("FixLevel").unwrap_or_default();

    let row_re = Regex::new(&format!(r"(?m)^.*____ {}.*$", regex::escape(module)))?;
    let Some(row) = row_re.find(report) else {
        return Ok(None);
    };

    let level = row
        .as_str()
        .trim_end_matches('\r')
        .get(column..)
        .unwrap_or("")
        .split(' ')
        .next()
        .unwrap_or("");

    Ok(Some(level.to_string()))
}
