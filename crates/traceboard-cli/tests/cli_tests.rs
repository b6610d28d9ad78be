use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture that sets up a temporary working directory
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Path to a shared sample log under the engine crate's test data
    fn sample(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("traceboard-engine/tests/samples")
            .join(name)
    }

    fn write_log(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, lines.join("\n")).expect("write log");
        path
    }

    fn command() -> Command {
        Command::cargo_bin("traceboard").expect("Failed to find traceboard binary")
    }
}

#[test]
fn test_analyze_writes_summary_json_to_stdout() {
    let output = TestFixture::command()
        .arg("analyze")
        .arg(TestFixture::sample("basic_session.jsonl"))
        .output()
        .expect("run analyze");

    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is summary JSON");
    assert_eq!(summary["rollup"]["total_sessions"], 1);
    assert_eq!(summary["rollup"]["tool_usage"][0]["name"], "search");
    assert_eq!(summary["rollup"]["tool_usage"][0]["count"], 2);
    assert_eq!(summary["sessions"][0]["duration_seconds"], 10.0);
}

#[test]
fn test_analyze_with_output_and_csv() {
    let fixture = TestFixture::new();
    let summary_path = fixture.path("summary.json");
    let csv_path = fixture.path("sessions.csv");

    TestFixture::command()
        .arg("analyze")
        .arg(TestFixture::sample("multi_session.jsonl"))
        .arg("--output")
        .arg(&summary_path)
        .arg("--csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis summary"))
        .stdout(predicate::str::contains("Summary written to"));

    assert!(summary_path.exists());
    let csv = fs::read_to_string(&csv_path).expect("csv written");
    assert!(csv.starts_with("session_id,"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_analyze_reports_parse_errors_on_stderr() {
    let output = TestFixture::command()
        .arg("analyze")
        .arg(TestFixture::sample("mixed_quality.jsonl"))
        .output()
        .expect("run analyze");

    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["diagnostics"]["records_parsed"], 5);
    assert_eq!(summary["diagnostics"]["parse_errors"], 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed record"));
}

#[test]
fn test_analyze_fails_when_nothing_is_readable() {
    let fixture = TestFixture::new();

    TestFixture::command()
        .arg("analyze")
        .arg(fixture.path("missing.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no readable input file"));
}

#[test]
fn test_agent_counts_merge_across_log_files() {
    let fixture = TestFixture::new();
    let log_a = fixture.write_log(
        "a.jsonl",
        &[
            r#"{"ts": 0, "kind": "session-start", "id": "s1"}"#,
            r#"{"ts": 1, "kind": "agent-invocation", "id": "s1", "agent": "writer"}"#,
            r#"{"ts": 2, "kind": "agent-invocation", "id": "s1", "agent": "writer"}"#,
            r#"{"ts": 3, "kind": "agent-invocation", "id": "s1", "agent": "writer"}"#,
            r#"{"ts": 4, "kind": "session-end", "id": "s1"}"#,
        ],
    );
    let log_b = fixture.write_log(
        "b.jsonl",
        &[
            r#"{"ts": 100, "kind": "session-start", "id": "s2"}"#,
            r#"{"ts": 101, "kind": "agent-invocation", "id": "s2", "agent": "writer"}"#,
            r#"{"ts": 102, "kind": "agent-invocation", "id": "s2", "agent": "writer"}"#,
            r#"{"ts": 103, "kind": "session-end", "id": "s2"}"#,
        ],
    );

    let output = TestFixture::command()
        .arg("analyze")
        .arg(&log_a)
        .arg(&log_b)
        .output()
        .expect("run analyze");
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["rollup"]["agent_usage"][0]["name"], "writer");
    assert_eq!(summary["rollup"]["agent_usage"][0]["count"], 5);
}

#[test]
fn test_dashboard_from_analyzed_summaries() {
    let fixture = TestFixture::new();
    let summary_path = fixture.path("summary.json");
    let workbook_path = fixture.path("report.xlsx");

    TestFixture::command()
        .arg("analyze")
        .arg(TestFixture::sample("multi_session.jsonl"))
        .arg("--output")
        .arg(&summary_path)
        .assert()
        .success();

    TestFixture::command()
        .arg("dashboard")
        .arg(&summary_path)
        .arg("--output")
        .arg(&workbook_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard written to"))
        .stdout(predicate::str::contains("Performance"));

    assert!(workbook_path.exists());
}

#[test]
fn test_dashboard_rejects_invalid_summary_file() {
    let fixture = TestFixture::new();
    let bad_summary = fixture.write_log("bad.json", &["this is not a summary"]);

    TestFixture::command()
        .arg("dashboard")
        .arg(&bad_summary)
        .arg("--output")
        .arg(fixture.path("report.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid metrics summary"));
}

#[test]
fn test_dashboard_sheet_filter_from_config() {
    let fixture = TestFixture::new();
    let config_path = fixture.path("config.toml");
    fs::write(
        &config_path,
        "[dashboard]\ntitle = \"Filtered\"\nsheets = [\"Overview\", \"Errors\"]\n",
    )
    .unwrap();

    let summary_path = fixture.path("summary.json");
    TestFixture::command()
        .arg("analyze")
        .arg(TestFixture::sample("basic_session.jsonl"))
        .arg("--output")
        .arg(&summary_path)
        .assert()
        .success();

    TestFixture::command()
        .arg("--config")
        .arg(&config_path)
        .arg("dashboard")
        .arg(&summary_path)
        .arg("--output")
        .arg(fixture.path("filtered.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 sheet(s): Overview, Errors"));
}

#[test]
fn test_check_reports_per_file_status() {
    let fixture = TestFixture::new();

    TestFixture::command()
        .arg("check")
        .arg(TestFixture::sample("basic_session.jsonl"))
        .arg(TestFixture::sample("mixed_quality.jsonl"))
        .arg(fixture.path("missing.jsonl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Valid"))
        .stdout(predicate::str::contains("⚠ Partial"))
        .stdout(predicate::str::contains("✗ Unreadable"));
}

#[test]
fn test_check_fails_when_nothing_is_readable() {
    let fixture = TestFixture::new();

    TestFixture::command()
        .arg("check")
        .arg(fixture.path("missing.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no readable log file"));
}
