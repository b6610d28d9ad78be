use std::path::PathBuf;
use traceboard_types::{Diagnostics, Error, FileDiagnostics, MetricsSummary, Result};

use crate::assembler::assemble_sessions;
use crate::merge::merge_summaries;
use crate::reader::{ParsedLog, read_log_file};
use crate::rollup::compute_rollup;

/// Analyze one or more log files into a single merged metrics summary.
///
/// Files are processed sequentially; each becomes its own summary and the set
/// folds through `merge_summaries`, so multi-file analysis and summary-level
/// merging share one union rule. An unreadable file degrades to a warning;
/// only the case where no file is readable at all is an error.
pub fn analyze_files(paths: &[PathBuf]) -> Result<MetricsSummary> {
    let mut per_file = Vec::new();
    let mut unreadable = Vec::new();

    for path in paths {
        match read_log_file(path) {
            Ok(log) => per_file.push(summarize_log(log)),
            Err(err) => unreadable.push(format!("skipped unreadable file: {}", err)),
        }
    }

    if per_file.is_empty() {
        return Err(Error::NoReadableInput { attempted: paths.to_vec() });
    }

    let mut merged = merge_summaries(per_file)?;
    merged.diagnostics.warnings.extend(unreadable);
    Ok(merged)
}

/// Analyze a single already-read log.
pub fn summarize_log(log: ParsedLog) -> MetricsSummary {
    let sessions = assemble_sessions(&log);
    let rollup = compute_rollup(&sessions);

    let mut diagnostics = Diagnostics {
        files: vec![FileDiagnostics {
            path: log.path.display().to_string(),
            fingerprint: log.fingerprint,
            records_parsed: log.records_parsed,
            parse_errors: log.parse_errors,
        }],
        ..Default::default()
    };
    diagnostics.recompute_totals();

    MetricsSummary { sessions, rollup, diagnostics }
}
