use std::path::Path;
use traceboard_types::{Error, MetricsSummary, Result};

/// Serialize a summary to the pretty-printed JSON interchange form.
pub fn summary_to_json(summary: &MetricsSummary) -> Result<String> {
    serde_json::to_string_pretty(summary)
        .map_err(|e| Error::Config(format!("could not serialize summary: {}", e)))
}

/// Write a summary to a path as JSON interchange.
pub fn write_summary_to(summary: &MetricsSummary, path: &Path) -> Result<()> {
    let json = summary_to_json(summary)?;
    std::fs::write(path, json).map_err(|e| Error::output(path, e.to_string()))
}

/// Load a previously-written summary from a path.
pub fn load_summary(path: &Path) -> Result<MetricsSummary> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| Error::Summary { path: path.to_path_buf(), source: e })
}

/// Write the per-session table as flat CSV for spreadsheet import.
pub fn write_sessions_csv(summary: &MetricsSummary, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| Error::output(path, e.to_string()))?;

    writer
        .write_record([
            "session_id",
            "source_path",
            "start_time",
            "end_time",
            "duration_seconds",
            "turns",
            "events",
            "agent_invocations",
            "tool_calls",
            "providers",
            "errors",
        ])
        .map_err(|e| Error::output(path, e.to_string()))?;

    for session in &summary.sessions {
        let providers: Vec<String> = session.providers.iter().map(|p| p.label()).collect();
        writer
            .write_record([
                session.session_id.clone(),
                session.source.path.clone(),
                session.start_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
                session.end_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
                session
                    .duration_seconds
                    .map(|d| format!("{:.3}", d))
                    .unwrap_or_default(),
                session.turn_count.to_string(),
                session.event_count.to_string(),
                session.agent_invocations.len().to_string(),
                session.tool_calls.len().to_string(),
                providers.join("; "),
                session.errors.len().to_string(),
            ])
            .map_err(|e| Error::output(path, e.to_string()))?;
    }

    writer.flush().map_err(|e| Error::output(path, e.to_string()))
}
