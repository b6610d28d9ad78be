use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use traceboard_types::{Error, LogEvent, Result};

use crate::schema::RawRecord;

/// One log file read end to end: normalized events plus parse accounting.
#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub path: PathBuf,
    /// SHA-256 hex digest of the file contents (the file-identity key).
    pub fingerprint: String,
    pub events: Vec<LogEvent>,
    pub records_parsed: u64,
    pub parse_errors: u64,
}

impl ParsedLog {
    /// Session id used for records that carry no explicit one: derived from
    /// the source file identity so per-file grouping stays stable.
    pub fn fallback_session_id(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "log".to_string());
        format!("{}-{}", stem, &self.fingerprint[..8.min(self.fingerprint.len())])
    }
}

/// Read one newline-delimited log file.
///
/// Blank lines are skipped silently. A line that is not valid JSON, or whose
/// record lacks a usable timestamp or kind, is counted as a parse error and
/// skipped; only an unreadable file is an error. Arrival order is preserved.
pub fn read_log_file(path: &Path) -> Result<ParsedLog> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let fingerprint = fingerprint_bytes(text.as_bytes());

    let mut events = Vec::new();
    let mut records_parsed = 0u64;
    let mut parse_errors = 0u64;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match RawRecord::from_line(line).and_then(RawRecord::normalize) {
            Some(event) => {
                records_parsed += 1;
                events.push(event);
            }
            None => parse_errors += 1,
        }
    }

    Ok(ParsedLog {
        path: path.to_path_buf(),
        fingerprint,
        events,
        records_parsed,
        parse_errors,
    })
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(lines: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.jsonl");
        let mut file = std::fs::File::create(&path).expect("create log");
        for line in lines {
            writeln!(file, "{}", line).expect("write line");
        }
        (dir, path)
    }

    #[test]
    fn test_malformed_lines_are_counted_not_fatal() {
        let (_dir, path) = write_log(&[
            r#"{"ts": 1, "kind": "session-start", "id": "s1"}"#,
            "not json at all {{{",
            r#"{"ts": 2, "kind": "turn", "id": "s1"}"#,
            "",
            r#"{"kind": "turn", "id": "s1"}"#,
        ]);

        let log = read_log_file(&path).expect("readable");
        assert_eq!(log.records_parsed, 2);
        // One unparseable line, one record without a timestamp.
        assert_eq!(log.parse_errors, 2);
        assert_eq!(log.events.len(), 2);
    }

    #[test]
    fn test_fingerprint_is_content_based() {
        let (_dir_a, path_a) = write_log(&[r#"{"ts": 1, "kind": "turn"}"#]);
        let (_dir_b, path_b) = write_log(&[r#"{"ts": 1, "kind": "turn"}"#]);
        let (_dir_c, path_c) = write_log(&[r#"{"ts": 2, "kind": "turn"}"#]);

        let a = read_log_file(&path_a).unwrap();
        let b = read_log_file(&path_b).unwrap();
        let c = read_log_file(&path_c).unwrap();

        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_log_file(Path::new("/nonexistent/log.jsonl")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
