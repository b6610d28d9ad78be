use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Session (the aggregation unit)
// ==========================================

/// Identity of the log file a session was read from.
///
/// The fingerprint is a SHA-256 hex digest of the file contents. It is the
/// deduplication key during merges: two session records carrying the same
/// fingerprint came from the same input, so the later one replaces the
/// earlier silently. Differing fingerprints under one session id are a
/// genuine collision and are flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSource {
    pub path: String,
    pub fingerprint: String,
}

/// One bounded unit of recorded activity, assembled from a file's events.
///
/// Constructed incrementally while scanning a file in arrival order,
/// finalized once the file is exhausted, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier from the event stream, or derived from the source
    /// file identity when the records carry none.
    pub session_id: String,

    /// Originating file and its content fingerprint.
    pub source: SessionSource,

    /// Explicit session-start timestamp if present, else earliest observed.
    pub start_time: Option<DateTime<Utc>>,

    /// Explicit session-end timestamp if present, else latest observed.
    pub end_time: Option<DateTime<Utc>>,

    /// `end − start` in seconds. `None` means unknown: either endpoint is
    /// missing, or the endpoints are inverted (malformed input is reported
    /// as unknown, never clamped).
    pub duration_seconds: Option<f64>,

    /// Number of turns: observed turn events, or a declared count if larger.
    pub turn_count: u64,

    /// All normalized events attributed to this session.
    pub event_count: u64,

    /// Agent invocations in arrival order.
    #[serde(default)]
    pub agent_invocations: Vec<AgentInvocation>,

    /// Tool calls in arrival order.
    #[serde(default)]
    pub tool_calls: Vec<ToolInvocation>,

    /// Distinct provider/model pairs, in first-observed order.
    #[serde(default)]
    pub providers: Vec<ProviderObservation>,

    /// Error occurrences in arrival order.
    #[serde(default)]
    pub errors: Vec<ErrorRecord>,
}

impl SessionRecord {
    /// Number of error occurrences in this session.
    pub fn error_count(&self) -> u64 {
        self.errors.len() as u64
    }
}

// ==========================================
// Components
// ==========================================

/// One agent invocation observed in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInvocation {
    pub timestamp: DateTime<Utc>,
    /// Agent name, `"unknown"` when the record carried none.
    pub agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

/// One tool call observed in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub timestamp: DateTime<Utc>,
    /// Tool name, `"unknown"` when the record carried none.
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

/// A provider/model pair observed in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderObservation {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderObservation {
    /// Display label: `provider / model`, or just the provider.
    pub fn label(&self) -> String {
        match &self.model {
            Some(model) => format!("{} / {}", self.provider, model),
            None => self.provider.clone(),
        }
    }
}

/// One error occurrence: an `error`-kind event, or any event whose payload
/// indicated failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Error-type bucket, `"unknown"` when the record carried none.
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
