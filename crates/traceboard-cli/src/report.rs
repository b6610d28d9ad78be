use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::path::Path;
use traceboard_dashboard::BuildOutcome;
use traceboard_types::{Error, MetricsSummary};

fn colors_enabled() -> bool {
    std::io::stdout().is_terminal()
}

/// Print the analysis report: top-level counts, ranked usage, diagnostics.
pub fn print_summary(summary: &MetricsSummary) {
    let rollup = &summary.rollup;

    println!("{}", "Analysis summary".bold());
    println!("  Sessions:          {}", rollup.total_sessions);
    println!("  Turns:             {}", rollup.total_turns);
    println!("  Agent invocations: {}", rollup.total_agent_invocations);
    println!("  Tool calls:        {}", rollup.total_tool_calls);
    println!("  Errors:            {}", rollup.error_count);

    if let Some(stats) = &rollup.duration {
        println!(
            "  Duration (s):      mean {:.1} / median {:.1} / max {:.1}",
            stats.mean_seconds, stats.median_seconds, stats.max_seconds
        );
    }
    if let Some(range) = &rollup.date_range {
        println!(
            "  Date range:        {} to {}",
            range.first.to_rfc3339(),
            range.last.to_rfc3339()
        );
    }

    if !rollup.agent_usage.is_empty() {
        println!("\n  Top agents:");
        for usage in rollup.agent_usage.iter().take(5) {
            println!("    {:<30} {}", usage.name, usage.count);
        }
    }
    if !rollup.tool_usage.is_empty() {
        println!("\n  Top tools:");
        for usage in rollup.tool_usage.iter().take(5) {
            println!("    {:<30} {}", usage.name, usage.count);
        }
    }

    print_diagnostics(summary, false);
}

/// Diagnostics only, on stderr — used when stdout is carrying summary JSON.
pub fn print_warnings_to_stderr(summary: &MetricsSummary) {
    print_diagnostics(summary, true);
}

fn print_diagnostics(summary: &MetricsSummary, to_stderr: bool) {
    let diagnostics = &summary.diagnostics;
    let mut lines = Vec::new();

    if diagnostics.parse_errors > 0 {
        lines.push(format!(
            "{} malformed record(s) skipped across {} file(s)",
            diagnostics.parse_errors,
            diagnostics.files.len()
        ));
    }
    for warning in &diagnostics.warnings {
        lines.push(warning.clone());
    }

    for line in lines {
        let line = if colors_enabled() {
            format!("{} {}", "warning:".yellow().bold(), line)
        } else {
            format!("warning: {}", line)
        };
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Per-file check view: parse accounting for one readable log.
pub fn print_check_ok(path: &Path, summary: &MetricsSummary) {
    println!("File: {}", path.display());

    let diagnostics = &summary.diagnostics;
    let clean = diagnostics.parse_errors == 0;
    let status = if clean { "✓ Valid" } else { "⚠ Partial" };
    if colors_enabled() {
        if clean {
            println!("Status: {}", status.green().bold());
        } else {
            println!("Status: {}", status.yellow().bold());
        }
    } else {
        println!("Status: {}", status);
    }

    println!("  - Records parsed: {}", diagnostics.records_parsed);
    println!("  - Parse errors:   {}", diagnostics.parse_errors);
    println!("  - Sessions:       {}", summary.rollup.total_sessions);
    for session in &summary.sessions {
        match session.duration_seconds {
            Some(duration) => {
                println!("      {} ({} events, {:.1}s)", session.session_id, session.event_count, duration)
            }
            None => println!(
                "      {} ({} events, unknown duration)",
                session.session_id, session.event_count
            ),
        }
    }
}

pub fn print_check_unreadable(path: &Path, err: &Error) {
    println!("File: {}", path.display());
    if colors_enabled() {
        println!("Status: {}", "✗ Unreadable".red().bold());
    } else {
        println!("Status: ✗ Unreadable");
    }
    println!("  {}", err);
}

/// Dashboard build view: sheets written and any per-sheet failures.
pub fn print_build_outcome(outcome: &BuildOutcome) {
    println!(
        "Rendered {} sheet(s): {}",
        outcome.sheets_written.len(),
        outcome.sheets_written.join(", ")
    );
    for warning in &outcome.warnings {
        if colors_enabled() {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        } else {
            eprintln!("warning: {}", warning);
        }
    }
}
