use chrono::{DateTime, Utc};
use std::collections::HashMap;
use traceboard_types::{
    AgentInvocation, ErrorRecord, EventKind, LogEvent, ProviderObservation, SessionRecord,
    SessionSource, ToolInvocation,
};

use crate::reader::ParsedLog;

const AGENT_KEYS: &[&str] = &["agent", "agent_name", "name"];
const TOOL_KEYS: &[&str] = &["tool", "tool_name", "name"];
const LATENCY_KEYS: &[&str] = &["latency_ms", "duration_ms", "latency"];
const ERROR_TYPE_KEYS: &[&str] = &["error_type", "errorType", "error_kind"];
const ERROR_MESSAGE_KEYS: &[&str] = &["message", "error", "detail"];

/// Group a file's events into finalized session records.
///
/// Events carrying an explicit session id group under it; the rest fall back
/// to the file-identity id. Arrival order is ground truth inside a session:
/// nothing is resorted, but endpoint derivation uses min/max observed
/// timestamps so out-of-order logs still get a correct duration.
pub fn assemble_sessions(log: &ParsedLog) -> Vec<SessionRecord> {
    let fallback_id = log.fallback_session_id();
    let source = SessionSource {
        path: log.path.display().to_string(),
        fingerprint: log.fingerprint.clone(),
    };

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&LogEvent>> = HashMap::new();

    for event in &log.events {
        let key = event
            .session_id
            .clone()
            .unwrap_or_else(|| fallback_id.clone());
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        group.push(event);
    }

    order
        .into_iter()
        .map(|session_id| {
            let events = groups.remove(&session_id).unwrap_or_default();
            finalize_session(session_id, &events, source.clone())
        })
        .collect()
}

fn finalize_session(
    session_id: String,
    events: &[&LogEvent],
    source: SessionSource,
) -> SessionRecord {
    let mut min_ts: Option<DateTime<Utc>> = None;
    let mut max_ts: Option<DateTime<Utc>> = None;
    let mut explicit_start: Option<DateTime<Utc>> = None;
    let mut explicit_end: Option<DateTime<Utc>> = None;

    let mut turns_observed = 0u64;
    let mut turns_declared = 0u64;

    let mut agent_invocations = Vec::new();
    let mut tool_calls = Vec::new();
    let mut providers: Vec<ProviderObservation> = Vec::new();
    let mut errors = Vec::new();

    for &event in events {
        let ts = event.timestamp;
        min_ts = Some(min_ts.map_or(ts, |m| m.min(ts)));
        max_ts = Some(max_ts.map_or(ts, |m| m.max(ts)));

        match event.kind {
            EventKind::SessionStart => {
                explicit_start = Some(explicit_start.map_or(ts, |s| s.min(ts)));
            }
            EventKind::SessionEnd => {
                explicit_end = Some(explicit_end.map_or(ts, |e| e.max(ts)));
            }
            EventKind::Turn => turns_observed += 1,
            EventKind::AgentInvocation => {
                agent_invocations.push(AgentInvocation {
                    timestamp: ts,
                    agent: name_or_unknown(event, AGENT_KEYS),
                    latency_ms: event.payload_f64(LATENCY_KEYS),
                });
            }
            EventKind::ToolCall => {
                tool_calls.push(ToolInvocation {
                    timestamp: ts,
                    tool: name_or_unknown(event, TOOL_KEYS),
                    latency_ms: event.payload_f64(LATENCY_KEYS),
                });
            }
            _ => {}
        }

        if let Some(declared) = event.payload_f64(&["turn_count", "turns"]) {
            if declared.is_finite() && declared >= 0.0 {
                turns_declared = turns_declared.max(declared as u64);
            }
        }

        observe_provider(&mut providers, event);

        if event.kind == EventKind::Error || event.payload_indicates_failure() {
            errors.push(ErrorRecord {
                timestamp: Some(ts),
                error_type: event
                    .payload_str(ERROR_TYPE_KEYS)
                    .unwrap_or("unknown")
                    .to_string(),
                message: event.payload_str(ERROR_MESSAGE_KEYS).map(str::to_string),
            });
        }
    }

    let start_time = explicit_start.or(min_ts);
    let end_time = explicit_end.or(max_ts);

    // Inverted endpoints are malformed input: duration stays unknown rather
    // than clamped or negative.
    let duration_seconds = match (start_time, end_time) {
        (Some(start), Some(end)) if end >= start => {
            Some((end - start).num_milliseconds() as f64 / 1000.0)
        }
        _ => None,
    };

    SessionRecord {
        session_id,
        source,
        start_time,
        end_time,
        duration_seconds,
        turn_count: turns_observed.max(turns_declared),
        event_count: events.len() as u64,
        agent_invocations,
        tool_calls,
        providers,
        errors,
    }
}

fn name_or_unknown(event: &LogEvent, keys: &[&str]) -> String {
    event.payload_str(keys).unwrap_or("unknown").to_string()
}

/// Record a provider/model observation, deduplicated in first-seen order.
/// Provider-call events always record; other kinds only when they carry an
/// explicit `provider` field.
fn observe_provider(providers: &mut Vec<ProviderObservation>, event: &LogEvent) {
    let provider_field = event.payload_str(&["provider"]);
    if event.kind != EventKind::ProviderCall && provider_field.is_none() {
        return;
    }

    let observation = ProviderObservation {
        provider: provider_field.unwrap_or("unknown").to_string(),
        model: event.payload_str(&["model"]).map(str::to_string),
    };
    if !providers.contains(&observation) {
        providers.push(observation);
    }
}
