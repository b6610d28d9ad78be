use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use traceboard_types::{EventKind, LogEvent};

const TIMESTAMP_KEYS: &[&str] = &["timestamp", "ts", "time"];
const KIND_KEYS: &[&str] = &["kind", "type", "event"];
const SESSION_KEYS: &[&str] = &["session_id", "sessionId", "id"];

/// Raw view of one log line.
///
/// The log format is only loosely specified and recorders disagree on field
/// names, so extraction is by alias list rather than a fixed schema: the
/// first matching key wins, and whatever is not claimed lands in `payload`
/// and is preserved opaquely.
#[derive(Debug, Clone)]
pub(crate) struct RawRecord {
    pub timestamp: Option<Value>,
    pub kind: Option<String>,
    pub session_id: Option<String>,
    pub payload: Map<String, Value>,
}

impl RawRecord {
    /// Parse one line. `None` means the line is not a JSON object at all.
    pub fn from_line(line: &str) -> Option<Self> {
        let mut map: Map<String, Value> = serde_json::from_str(line).ok()?;

        let timestamp = take_first(&mut map, TIMESTAMP_KEYS);
        let kind = take_first(&mut map, KIND_KEYS).and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        });
        let session_id = take_first(&mut map, SESSION_KEYS).and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        });

        Some(Self { timestamp, kind, session_id, payload: map })
    }

    /// Normalize into a `LogEvent`.
    ///
    /// Timestamp and kind are the only required fields; a record missing
    /// either is a parse error (returns `None`). An unrecognized kind string
    /// still normalizes, as `EventKind::Other`.
    pub fn normalize(self) -> Option<LogEvent> {
        let timestamp = parse_timestamp(self.timestamp.as_ref()?)?;
        let kind = EventKind::parse(self.kind.as_deref()?);

        Some(LogEvent {
            timestamp,
            kind,
            session_id: self.session_id,
            payload: self.payload,
        })
    }
}

/// Remove and return the first present key from the alias list.
fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

/// Parse a raw timestamp value: epoch seconds (integer or fractional) or an
/// RFC 3339 / ISO-8601 string. Naive strings are taken as UTC.
pub(crate) fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let seconds = n.as_f64()?;
            if !seconds.is_finite() {
                return None;
            }
            let millis = (seconds * 1000.0).round();
            if millis.abs() > i64::MAX as f64 {
                return None;
            }
            Utc.timestamp_millis_opt(millis as i64).single()
        }
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive ISO-8601 variants (Python's isoformat omits the offset)
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
