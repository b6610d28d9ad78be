use traceboard_types::{MetricsSummary, Rollup, UsageCount};

use crate::grid::{Cell, SheetGrid};
use crate::ranges::{NamedRange, column_letter};

/// Chart shapes used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Column,
    Pie,
    Line,
}

/// A chart bound to named ranges of its sheet.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub categories: NamedRange,
    pub values: NamedRange,
    /// Anchor cell (row, col) the chart is inserted at.
    pub insert_at: (u32, u16),
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
}

/// One sheet ready for rendering: the grid, its charts, and the ranges to
/// register as workbook defined names.
#[derive(Debug, Clone)]
pub struct SheetDef {
    pub grid: SheetGrid,
    pub charts: Vec<ChartSpec>,
    pub names: Vec<NamedRange>,
}

/// Compose the fixed sheet set for a summary, in report order.
///
/// The Performance sheet is omitted entirely when fewer than two sessions
/// exist; every other sheet always appears (empty tables render as a header
/// row, the Errors sheet as its empty-state message).
pub fn compose_sheets(summary: &MetricsSummary, title: &str) -> Vec<SheetDef> {
    let mut sheets = vec![
        overview_sheet(summary, title),
        usage_sheet(
            "Agent Usage",
            "Agent",
            "Invocations",
            "agent",
            &summary.rollup.agent_usage,
        ),
        usage_sheet(
            "Tool Usage",
            "Tool",
            "Calls",
            "tool",
            &summary.rollup.tool_usage,
        ),
        provider_sheet(&summary.rollup),
    ];
    if let Some(performance) = performance_sheet(summary) {
        sheets.push(performance);
    }
    sheets.push(errors_sheet(&summary.rollup));
    sheets.push(sessions_sheet(summary));
    sheets
}

fn overview_sheet(summary: &MetricsSummary, title: &str) -> SheetDef {
    let rollup = &summary.rollup;
    let mut grid = SheetGrid::new("Overview", vec!["Metric", "Value"], vec![28.0, 24.0]);
    grid.title = Some(title.to_string());

    let counts: &[(&str, u64)] = &[
        ("Sessions", rollup.total_sessions),
        ("Turns", rollup.total_turns),
        ("Events", rollup.total_events),
        ("Agent invocations", rollup.total_agent_invocations),
        ("Tool calls", rollup.total_tool_calls),
        ("Errors", rollup.error_count),
        ("Parse errors", summary.diagnostics.parse_errors),
    ];
    for (metric, value) in counts {
        grid.push_row(vec![Cell::text(*metric), Cell::number(*value as f64)]);
    }

    match &rollup.date_range {
        Some(range) => {
            grid.push_row(vec![
                Cell::text("First activity"),
                Cell::text(range.first.to_rfc3339()),
            ]);
            grid.push_row(vec![
                Cell::text("Last activity"),
                Cell::text(range.last.to_rfc3339()),
            ]);
        }
        None => {
            grid.push_row(vec![Cell::text("Date range"), Cell::text("no dated sessions")]);
        }
    }

    SheetDef { grid, charts: Vec::new(), names: Vec::new() }
}

/// Ranked name → count table with a live share column and a column chart.
/// Shared by the agent and tool sheets.
fn usage_sheet(
    sheet_name: &str,
    label_header: &str,
    count_header: &str,
    range_prefix: &str,
    entries: &[UsageCount],
) -> SheetDef {
    let mut grid = SheetGrid::new(
        sheet_name,
        vec![label_header, count_header, "Share"],
        vec![32.0, 14.0, 10.0],
    );
    grid.percent_columns = vec![2];

    let first = grid.data_start_row();
    let last = first + entries.len().max(1) as u32 - 1;
    for (i, entry) in entries.iter().enumerate() {
        let row = first + i as u32;
        grid.push_row(vec![
            Cell::text(&entry.name),
            Cell::number(entry.count as f64),
            share_formula(1, row, first, last),
        ]);
    }

    let mut charts = Vec::new();
    let mut names = Vec::new();
    if !entries.is_empty() {
        let labels = NamedRange::new(
            format!("{}_names", range_prefix),
            sheet_name,
            0,
            first,
            last,
        );
        let counts = NamedRange::new(
            format!("{}_counts", range_prefix),
            sheet_name,
            1,
            first,
            last,
        );
        charts.push(ChartSpec {
            kind: ChartKind::Column,
            title: format!("{} by {}", count_header, label_header.to_lowercase()),
            categories: labels.clone(),
            values: counts.clone(),
            insert_at: (1, 5),
            x_axis: Some(label_header.to_string()),
            y_axis: Some(count_header.to_string()),
        });
        names.push(labels);
        names.push(counts);
    }

    SheetDef { grid, charts, names }
}

fn provider_sheet(rollup: &Rollup) -> SheetDef {
    let mut grid = SheetGrid::new(
        "Providers",
        vec!["Provider", "Model", "Sessions", "Share"],
        vec![20.0, 28.0, 12.0, 10.0],
    );
    grid.percent_columns = vec![3];

    let first = grid.data_start_row();
    let last = first + rollup.provider_usage.len().max(1) as u32 - 1;
    for (i, usage) in rollup.provider_usage.iter().enumerate() {
        let row = first + i as u32;
        grid.push_row(vec![
            Cell::text(&usage.provider),
            match &usage.model {
                Some(model) => Cell::text(model),
                None => Cell::Empty,
            },
            Cell::number(usage.count as f64),
            share_formula(2, row, first, last),
        ]);
    }

    let mut names = Vec::new();
    if !rollup.provider_usage.is_empty() {
        names.push(NamedRange::new("provider_counts", "Providers", 2, first, last));
    }

    SheetDef { grid, charts: Vec::new(), names }
}

fn performance_sheet(summary: &MetricsSummary) -> Option<SheetDef> {
    if summary.sessions.len() < 2 {
        return None;
    }

    let mut grid = SheetGrid::new(
        "Performance",
        vec!["Metric", "Seconds", "", "Session Start", "Duration (s)"],
        vec![20.0, 14.0, 4.0, 26.0, 14.0],
    );

    let stats: Vec<(String, Cell)> = match &summary.rollup.duration {
        Some(stats) => vec![
            ("Mean duration".to_string(), Cell::number(stats.mean_seconds)),
            ("Median duration".to_string(), Cell::number(stats.median_seconds)),
            ("Max duration".to_string(), Cell::number(stats.max_seconds)),
            ("Sessions timed".to_string(), Cell::number(stats.sessions_timed as f64)),
        ],
        None => vec![("Duration".to_string(), Cell::text("unknown"))],
    };

    let timed: Vec<(String, f64)> = summary
        .sessions
        .iter()
        .filter_map(|s| {
            let start = s.start_time?;
            let duration = s.duration_seconds?;
            Some((start.to_rfc3339(), duration))
        })
        .collect();

    let row_count = stats.len().max(timed.len());
    for i in 0..row_count {
        let (metric, value) = match stats.get(i) {
            Some((metric, value)) => (Cell::text(metric), value.clone()),
            None => (Cell::Empty, Cell::Empty),
        };
        let (start, duration) = match timed.get(i) {
            Some((start, duration)) => (Cell::text(start), Cell::number(*duration)),
            None => (Cell::Empty, Cell::Empty),
        };
        grid.push_row(vec![metric, value, Cell::Empty, start, duration]);
    }

    let mut charts = Vec::new();
    let mut names = Vec::new();
    if timed.len() >= 2 {
        let first = grid.data_start_row();
        let last = first + timed.len() as u32 - 1;
        let starts = NamedRange::new("session_starts", "Performance", 3, first, last);
        let durations = NamedRange::new("session_durations", "Performance", 4, first, last);
        charts.push(ChartSpec {
            kind: ChartKind::Line,
            title: "Session duration trend".to_string(),
            categories: starts.clone(),
            values: durations.clone(),
            insert_at: (row_count as u32 + 2, 0),
            x_axis: Some("Session start".to_string()),
            y_axis: Some("Duration (s)".to_string()),
        });
        names.push(starts);
        names.push(durations);
    }

    Some(SheetDef { grid, charts, names })
}

fn errors_sheet(rollup: &Rollup) -> SheetDef {
    let mut grid = SheetGrid::new("Errors", vec!["Error Type", "Count"], vec![28.0, 12.0]);

    // Empty state: a message row, and deliberately no chart over no data.
    if rollup.error_count == 0 {
        grid.push_row(vec![Cell::text("No errors recorded."), Cell::Empty]);
        return SheetDef { grid, charts: Vec::new(), names: Vec::new() };
    }

    let first = grid.data_start_row();
    let last = first + rollup.error_types.len() as u32 - 1;
    for entry in &rollup.error_types {
        grid.push_row(vec![Cell::text(&entry.name), Cell::number(entry.count as f64)]);
    }

    let types = NamedRange::new("error_types", "Errors", 0, first, last);
    let counts = NamedRange::new("error_counts", "Errors", 1, first, last);
    let charts = vec![ChartSpec {
        kind: ChartKind::Pie,
        title: "Errors by type".to_string(),
        categories: types.clone(),
        values: counts.clone(),
        insert_at: (1, 4),
        x_axis: None,
        y_axis: None,
    }];

    SheetDef { grid, charts, names: vec![types, counts] }
}

fn sessions_sheet(summary: &MetricsSummary) -> SheetDef {
    let mut grid = SheetGrid::new(
        "Sessions",
        vec![
            "Session ID",
            "Source",
            "Start",
            "End",
            "Duration (s)",
            "Turns",
            "Events",
            "Agent Invocations",
            "Tool Calls",
            "Providers",
            "Errors",
        ],
        vec![24.0, 32.0, 26.0, 26.0, 14.0, 8.0, 8.0, 16.0, 10.0, 32.0, 8.0],
    );
    grid.freeze_header = true;

    for session in &summary.sessions {
        let providers: Vec<String> = session.providers.iter().map(|p| p.label()).collect();
        grid.push_row(vec![
            Cell::text(&session.session_id),
            Cell::text(&session.source.path),
            optional_time(session.start_time),
            optional_time(session.end_time),
            match session.duration_seconds {
                Some(duration) => Cell::number(duration),
                None => Cell::text("unknown"),
            },
            Cell::number(session.turn_count as f64),
            Cell::number(session.event_count as f64),
            Cell::number(session.agent_invocations.len() as f64),
            Cell::number(session.tool_calls.len() as f64),
            Cell::text(providers.join("; ")),
            Cell::number(session.errors.len() as f64),
        ]);
    }

    SheetDef { grid, charts: Vec::new(), names: Vec::new() }
}

fn optional_time(time: Option<chrono::DateTime<chrono::Utc>>) -> Cell {
    match time {
        Some(time) => Cell::text(time.to_rfc3339()),
        None => Cell::Empty,
    }
}

/// Live percentage-of-total formula: this row's count over the sum of the
/// whole count column, so edits to the counts recalculate every share.
fn share_formula(count_col: u16, row: u32, first: u32, last: u32) -> Cell {
    let col = column_letter(count_col);
    Cell::Formula(format!(
        "={}{}/SUM({}${}:{}${})",
        col,
        row + 1,
        col,
        first + 1,
        col,
        last + 1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_summary() -> MetricsSummary {
        MetricsSummary::default()
    }

    fn summary_from_json(json: &str) -> MetricsSummary {
        serde_json::from_str(json).expect("valid summary json")
    }

    #[test]
    fn test_zero_sessions_compose_without_performance() {
        let sheets = compose_sheets(&zero_summary(), "Dashboard");
        let names: Vec<&str> = sheets.iter().map(|s| s.grid.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["Overview", "Agent Usage", "Tool Usage", "Providers", "Errors", "Sessions"]
        );
    }

    #[test]
    fn test_zero_sessions_overview_shows_zero_counts() {
        let sheets = compose_sheets(&zero_summary(), "Dashboard");
        let overview = &sheets[0];

        assert_eq!(overview.grid.rows[0][0], Cell::text("Sessions"));
        assert_eq!(overview.grid.rows[0][1], Cell::number(0.0));
        // No charts anywhere reference nonexistent data.
        for sheet in &sheets {
            assert!(sheet.charts.is_empty(), "sheet {} has a chart", sheet.grid.name);
        }
    }

    #[test]
    fn test_errors_sheet_empty_state_has_message_not_chart() {
        let sheets = compose_sheets(&zero_summary(), "Dashboard");
        let errors = sheets.iter().find(|s| s.grid.name == "Errors").unwrap();

        assert_eq!(errors.grid.rows.len(), 1);
        assert_eq!(errors.grid.rows[0][0], Cell::text("No errors recorded."));
        assert!(errors.charts.is_empty());
        assert!(errors.names.is_empty());
    }

    #[test]
    fn test_share_formula_is_live_not_literal() {
        let summary = summary_from_json(
            r#"{
                "rollup": {
                    "agent_usage": [
                        {"name": "writer", "count": 3},
                        {"name": "reviewer", "count": 1}
                    ]
                }
            }"#,
        );
        let sheets = compose_sheets(&summary, "Dashboard");
        let agents = sheets.iter().find(|s| s.grid.name == "Agent Usage").unwrap();

        assert_eq!(
            agents.grid.rows[0][2],
            Cell::Formula("=B2/SUM(B$2:B$3)".to_string())
        );
        assert_eq!(
            agents.grid.rows[1][2],
            Cell::Formula("=B3/SUM(B$2:B$3)".to_string())
        );

        let counts = agents.names.iter().find(|n| n.name == "agent_counts").unwrap();
        assert_eq!(counts.formula(), "='Agent Usage'!$B$2:$B$3");
    }

    #[test]
    fn test_performance_requires_two_sessions() {
        let one = summary_from_json(
            r#"{
                "sessions": [{
                    "session_id": "s1",
                    "source": {"path": "a.jsonl", "fingerprint": "aa"},
                    "start_time": "2025-06-01T09:00:00Z",
                    "end_time": "2025-06-01T09:30:00Z",
                    "duration_seconds": 1800.0,
                    "turn_count": 1,
                    "event_count": 2
                }]
            }"#,
        );
        assert!(performance_sheet(&one).is_none());

        let two = summary_from_json(
            r#"{
                "sessions": [
                    {
                        "session_id": "s1",
                        "source": {"path": "a.jsonl", "fingerprint": "aa"},
                        "start_time": "2025-06-01T09:00:00Z",
                        "end_time": "2025-06-01T09:30:00Z",
                        "duration_seconds": 1800.0,
                        "turn_count": 1,
                        "event_count": 2
                    },
                    {
                        "session_id": "s2",
                        "source": {"path": "b.jsonl", "fingerprint": "bb"},
                        "start_time": "2025-06-02T09:00:00Z",
                        "end_time": "2025-06-02T09:10:00Z",
                        "duration_seconds": 600.0,
                        "turn_count": 1,
                        "event_count": 2
                    }
                ],
                "rollup": {
                    "duration": {
                        "mean_seconds": 1200.0,
                        "median_seconds": 1200.0,
                        "max_seconds": 1800.0,
                        "sessions_timed": 2
                    }
                }
            }"#,
        );
        let sheet = performance_sheet(&two).expect("performance sheet");
        assert_eq!(sheet.charts.len(), 1);
        assert_eq!(sheet.charts[0].kind, ChartKind::Line);
        assert_eq!(sheet.names.len(), 2);
    }

    #[test]
    fn test_sessions_sheet_reports_unknown_duration_as_text() {
        let summary = summary_from_json(
            r#"{
                "sessions": [{
                    "session_id": "s1",
                    "source": {"path": "a.jsonl", "fingerprint": "aa"},
                    "start_time": "2025-06-01T09:00:00Z",
                    "end_time": "2025-06-01T08:00:00Z",
                    "duration_seconds": null,
                    "turn_count": 0,
                    "event_count": 2
                }]
            }"#,
        );
        let sheets = compose_sheets(&summary, "Dashboard");
        let sessions = sheets.iter().find(|s| s.grid.name == "Sessions").unwrap();

        assert_eq!(sessions.grid.rows[0][4], Cell::text("unknown"));
    }
}
