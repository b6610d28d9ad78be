use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// NOTE: Schema Design Goals
//
// 1. Normalization: raw log lines are heterogeneous and partially malformed.
//    The engine folds every spelling variant (kebab/snake kinds, epoch or
//    RFC 3339 timestamps, aliased field names) into this one event shape.
//
// 2. Opacity: only timestamp, kind and session id are interpreted up front.
//    Everything else rides along in `payload` and is read defensively at the
//    point of use — a missing field is never an error.
//
// 3. Degradation: records with an unrecognized kind become `EventKind::Other`
//    instead of being dropped, so event counts stay truthful.

/// Kind of a log event, as recorded by the session runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    SessionStart,
    SessionEnd,
    Turn,
    AgentInvocation,
    ToolCall,
    Error,
    ProviderCall,
    /// Unrecognized kind, retained so the record still counts as an event
    Other,
}

impl EventKind {
    /// Parse a raw kind string, tolerating kebab-case and snake_case.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "session-start" => EventKind::SessionStart,
            "session-end" => EventKind::SessionEnd,
            "turn" => EventKind::Turn,
            "agent-invocation" => EventKind::AgentInvocation,
            "tool-call" => EventKind::ToolCall,
            "error" => EventKind::Error,
            "provider-call" => EventKind::ProviderCall,
            _ => EventKind::Other,
        }
    }
}

/// One normalized record from an event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Event timestamp (UTC)
    pub timestamp: DateTime<Utc>,

    /// Event kind
    pub kind: EventKind,

    /// Explicit session grouping key, if the record carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Kind-specific fields, preserved opaquely
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

impl LogEvent {
    /// Read a string payload field, trying each alias in order.
    pub fn payload_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|k| self.payload.get(*k))
            .and_then(Value::as_str)
    }

    /// Read a numeric payload field, trying each alias in order.
    pub fn payload_f64(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|k| self.payload.get(*k))
            .and_then(Value::as_f64)
    }

    /// Whether the payload marks this event as failed, independent of kind.
    pub fn payload_indicates_failure(&self) -> bool {
        if let Some(status) = self.payload_str(&["status", "result", "outcome"]) {
            let status = status.to_ascii_lowercase();
            if status == "error" || status == "failed" || status == "failure" {
                return true;
            }
        }
        if self.payload.get("is_error").and_then(Value::as_bool) == Some(true) {
            return true;
        }
        self.payload.get("success").and_then(Value::as_bool) == Some(false)
    }
}
