pub mod check;
pub mod diff;
pub mod edit;
pub mod geometry;
pub mod normalize;

use std::path::Path;

use pcbdiff_core::ops::LoadReport;

/// Boxed error used by every command
pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Tell the user about rows that did not load
pub fn report_skipped(path: &Path, report: &LoadReport) {
    for skipped in &report.skipped {
        eprintln!(
            "{}: line {} skipped ({}{})",
            path.display(),
            skipped.line,
            skipped.reason.as_str(),
            skipped
                .reference_id
                .as_deref()
                .map(|r| format!(", {}", r))
                .unwrap_or_default()
        );
    }
    for id in &report.duplicates {
        eprintln!("{}: duplicate reference {}, later row kept", path.display(), id);
    }
}
