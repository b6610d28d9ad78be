use std::collections::HashMap;
use traceboard_types::{Diagnostics, Error, MetricsSummary, Result, SessionRecord};

use crate::rollup::compute_rollup;

/// Merge metrics summaries by union-then-recompute.
///
/// Per-session records union by session id. Two records with the same id and
/// the same source fingerprint are the same input analyzed twice and dedupe
/// silently — merging a summary with itself is a no-op. Records with the same
/// id but different fingerprints are a genuine collision: the later record
/// wins and a warning is attached to the merged diagnostics.
///
/// The rollup is recomputed from the unioned records, never accumulated, so
/// merge order cannot double-count and the result is order-independent.
pub fn merge_summaries(summaries: Vec<MetricsSummary>) -> Result<MetricsSummary> {
    if summaries.is_empty() {
        return Err(Error::NoSummaries);
    }

    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, SessionRecord> = HashMap::new();
    let mut diagnostics = Diagnostics::default();

    for summary in summaries {
        for file in summary.diagnostics.files {
            if !diagnostics.files.iter().any(|f| f.fingerprint == file.fingerprint) {
                diagnostics.files.push(file);
            }
        }
        for warning in summary.diagnostics.warnings {
            if !diagnostics.warnings.contains(&warning) {
                diagnostics.warnings.push(warning);
            }
        }

        for session in summary.sessions {
            match by_id.get(&session.session_id) {
                None => order.push(session.session_id.clone()),
                // Same input seen again: replace silently.
                Some(existing) if existing.source.fingerprint == session.source.fingerprint => {}
                Some(existing) => {
                    let warning = format!(
                        "duplicate session id '{}' from {} and {}; keeping the later record",
                        session.session_id, existing.source.path, session.source.path
                    );
                    if !diagnostics.warnings.contains(&warning) {
                        diagnostics.warnings.push(warning);
                    }
                }
            }
            by_id.insert(session.session_id.clone(), session);
        }
    }

    let mut sessions: Vec<SessionRecord> = order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    // Deterministic ordering regardless of input order; this is also the
    // traversal that defines first-seen ranking ties in the rollup.
    sessions.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.session_id.cmp(&b.session_id))
    });
    diagnostics
        .files
        .sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.fingerprint.cmp(&b.fingerprint)));

    diagnostics.recompute_totals();
    let rollup = compute_rollup(&sessions);

    Ok(MetricsSummary { sessions, rollup, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use traceboard_types::{AgentInvocation, FileDiagnostics, SessionSource};

    fn summary_with_agent(
        session_id: &str,
        fingerprint: &str,
        start: i64,
        agent: &str,
        invocations: usize,
    ) -> MetricsSummary {
        let start_time = Utc.timestamp_opt(start, 0).unwrap();
        let session = SessionRecord {
            session_id: session_id.to_string(),
            source: SessionSource {
                path: format!("{}.jsonl", fingerprint),
                fingerprint: fingerprint.to_string(),
            },
            start_time: Some(start_time),
            end_time: Some(start_time),
            duration_seconds: Some(0.0),
            turn_count: 0,
            event_count: invocations as u64,
            agent_invocations: (0..invocations)
                .map(|_| AgentInvocation {
                    timestamp: start_time,
                    agent: agent.to_string(),
                    latency_ms: None,
                })
                .collect(),
            tool_calls: Vec::new(),
            providers: Vec::new(),
            errors: Vec::new(),
        };

        let sessions = vec![session];
        let rollup = compute_rollup(&sessions);
        MetricsSummary {
            sessions,
            rollup,
            diagnostics: Diagnostics {
                files: vec![FileDiagnostics {
                    path: format!("{}.jsonl", fingerprint),
                    fingerprint: fingerprint.to_string(),
                    records_parsed: invocations as u64,
                    parse_errors: 0,
                }],
                records_parsed: invocations as u64,
                parse_errors: 0,
                warnings: Vec::new(),
            },
        }
    }

    #[test]
    fn test_merge_requires_input() {
        assert!(matches!(merge_summaries(Vec::new()), Err(Error::NoSummaries)));
    }

    #[test]
    fn test_self_merge_is_idempotent() {
        let summary = summary_with_agent("s1", "fp-a", 100, "writer", 3);
        let merged = merge_summaries(vec![summary.clone(), summary.clone()]).unwrap();

        assert_eq!(merged.rollup.total_sessions, 1);
        assert_eq!(merged.rollup.total_agent_invocations, 3);
        assert_eq!(merged.diagnostics.records_parsed, 3);
        assert!(merged.diagnostics.warnings.is_empty());
        assert_eq!(
            serde_json::to_string(&merged.rollup).unwrap(),
            serde_json::to_string(&summary.rollup).unwrap()
        );
    }

    #[test]
    fn test_agent_counts_sum_across_summaries() {
        let a = summary_with_agent("s1", "fp-a", 100, "writer", 3);
        let b = summary_with_agent("s2", "fp-b", 200, "writer", 2);
        let merged = merge_summaries(vec![a, b]).unwrap();

        assert_eq!(merged.rollup.total_sessions, 2);
        assert_eq!(merged.rollup.agent_usage.len(), 1);
        assert_eq!(merged.rollup.agent_usage[0].name, "writer");
        assert_eq!(merged.rollup.agent_usage[0].count, 5);
    }

    #[test]
    fn test_id_collision_is_flagged_and_last_wins() {
        let a = summary_with_agent("s1", "fp-a", 100, "writer", 3);
        let b = summary_with_agent("s1", "fp-b", 100, "reviewer", 2);
        let merged = merge_summaries(vec![a, b]).unwrap();

        assert_eq!(merged.rollup.total_sessions, 1);
        assert_eq!(merged.rollup.agent_usage[0].name, "reviewer");
        assert_eq!(merged.diagnostics.warnings.len(), 1);
        assert!(merged.diagnostics.warnings[0].contains("duplicate session id 's1'"));
    }

    #[test]
    fn test_merge_order_does_not_change_result() {
        let a = summary_with_agent("s1", "fp-a", 300, "writer", 1);
        let b = summary_with_agent("s2", "fp-b", 100, "reviewer", 1);

        let ab = merge_summaries(vec![a.clone(), b.clone()]).unwrap();
        let ba = merge_summaries(vec![b, a]).unwrap();

        assert_eq!(
            serde_json::to_string(&ab).unwrap(),
            serde_json::to_string(&ba).unwrap()
        );
        // Sessions come out sorted by start time.
        assert_eq!(ab.sessions[0].session_id, "s2");
    }
}
