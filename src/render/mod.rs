//! Output rendering for merged records and job reports

use crate::domain::{MergePlan, MergeReport, OrderedRecord};
use crate::utils::normalize_path;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt::Write as _;

/// Render a record as pretty-printed JSON.
///
/// Uses `indent` spaces per level, keeps non-ASCII characters literal, and
/// emits no trailing newline. Key order is the record's insertion order.
pub fn render_record(record: &OrderedRecord, indent: usize) -> serde_json::Result<Vec<u8>> {
    let indent_unit = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent_unit));
    record.serialize(&mut serializer)?;
    Ok(buf)
}

/// Human-readable end-of-job summary.
pub fn render_report_text(report: &MergeReport) -> String {
    let mut out = format!(
        "Merge completed! {} files created in {}.",
        report.files_written,
        report.output.display()
    );
    if report.stopped_early {
        out.push_str("\nStopped after the first write failure.");
    }
    out
}

/// One line per recovered failure, for stderr.
pub fn render_issues_text(report: &MergeReport) -> String {
    let mut out = format!("{} issue(s) reported:", report.issues.len());
    for issue in &report.issues {
        let detail = issue.detail.replace('\n', " ");
        let _ = write!(out, "\n  [{:?}] {}: {}", issue.kind, normalize_path(&issue.path), detail);
    }
    out
}

pub fn render_plan_text(plan: &MergePlan) -> String {
    let mut out = format!("Files to merge: {}", plan.files.len());
    for file in &plan.files {
        let sources =
            file.sources.iter().map(|p| normalize_path(p)).collect::<Vec<_>>().join(", ");
        let _ = write!(out, "\n  {} <- {}", file.name, sources);
    }
    if !plan.ignored.is_empty() {
        out.push_str("\nIgnored (missing from the first folder):");
        for name in &plan.ignored {
            let _ = write!(out, "\n  {name}");
        }
    }
    out
}
