use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;

// ==========================================
// Metrics Summary (interchange format)
// ==========================================

/// Serialized output of a whole analysis run.
///
/// This is the contract between the Analyzer and the Dashboard Builder: the
/// Builder depends only on these field names, and every rollup field defaults
/// so a summary written by an older analyzer still renders (missing metric →
/// zero, not an error).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MetricsSummary {
    /// Per-session records, sorted by (start_time, session_id).
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,

    /// Cross-session aggregate, always recomputed from `sessions`.
    #[serde(default)]
    pub rollup: Rollup,

    /// Accumulated per-record and per-file problems.
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

/// Cross-session aggregate statistics.
///
/// Invariant: every count here is a consistent sum over the per-session
/// records in the same summary. The rollup is a pure function of
/// `MetricsSummary::sessions` and never accumulates across merges.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Rollup {
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub total_turns: u64,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub total_agent_invocations: u64,
    #[serde(default)]
    pub total_tool_calls: u64,

    /// Agents ranked by invocation count, ties in first-seen order.
    #[serde(default)]
    pub agent_usage: Vec<UsageCount>,

    /// Tools ranked by call count, ties in first-seen order.
    #[serde(default)]
    pub tool_usage: Vec<UsageCount>,

    /// Provider/model distribution, same ranking rule.
    #[serde(default)]
    pub provider_usage: Vec<ProviderUsage>,

    /// Total error occurrences; equals the sum of per-session error counts.
    #[serde(default)]
    pub error_count: u64,

    /// Error-type distribution, same ranking rule.
    #[serde(default)]
    pub error_types: Vec<UsageCount>,

    /// Timing statistics over sessions with a known duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationStats>,

    /// Earliest session start and latest session end observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

/// A name and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCount {
    pub name: String,
    pub count: u64,
}

/// Provider/model usage entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUsage {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub count: u64,
}

/// Basic timing statistics, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub mean_seconds: f64,
    pub median_seconds: f64,
    pub max_seconds: f64,
    /// How many sessions carried a known duration.
    pub sessions_timed: u64,
}

/// Observed time span of the summarized sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
}

// ==========================================
// Diagnostics
// ==========================================

/// Parse outcome for one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiagnostics {
    pub path: String,
    /// SHA-256 content fingerprint; union key when summaries are merged.
    pub fingerprint: String,
    pub records_parsed: u64,
    pub parse_errors: u64,
}

/// Accumulated non-fatal problems from an analysis run.
///
/// Partial data is never silently discarded: every skipped record and every
/// unreadable file leaves a trace here instead of raising.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Diagnostics {
    /// One entry per input file read.
    #[serde(default)]
    pub files: Vec<FileDiagnostics>,

    /// Total records successfully parsed, summed over `files`.
    #[serde(default)]
    pub records_parsed: u64,

    /// Total malformed records skipped, summed over `files`.
    #[serde(default)]
    pub parse_errors: u64,

    /// Unreadable files, session-id collisions, and other warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Diagnostics {
    /// Recompute the totals from the per-file entries.
    pub fn recompute_totals(&mut self) {
        self.records_parsed = self.files.iter().map(|f| f.records_parsed).sum();
        self.parse_errors = self.files.iter().map(|f| f.parse_errors).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_totals_follow_files() {
        let mut diagnostics = Diagnostics {
            files: vec![
                FileDiagnostics {
                    path: "a.jsonl".to_string(),
                    fingerprint: "aa".to_string(),
                    records_parsed: 5,
                    parse_errors: 1,
                },
                FileDiagnostics {
                    path: "b.jsonl".to_string(),
                    fingerprint: "bb".to_string(),
                    records_parsed: 3,
                    parse_errors: 0,
                },
            ],
            ..Default::default()
        };

        diagnostics.recompute_totals();
        assert_eq!(diagnostics.records_parsed, 8);
        assert_eq!(diagnostics.parse_errors, 1);
    }

    #[test]
    fn test_summary_tolerates_missing_rollup_fields() {
        // A summary written without rollup fields still decodes to zeros.
        let summary: MetricsSummary = serde_json::from_str(r#"{"sessions": []}"#).unwrap();
        assert_eq!(summary.rollup.total_sessions, 0);
        assert_eq!(summary.rollup.error_count, 0);
        assert!(summary.rollup.duration.is_none());
        assert!(summary.diagnostics.warnings.is_empty());
    }
}
