use anyhow::Result;
use std::path::{Path, PathBuf};
use traceboard_engine::{analyze_files, summary_to_json, write_sessions_csv, write_summary_to};

use crate::report;

pub fn handle(logs: &[PathBuf], output: Option<&Path>, csv: Option<&Path>) -> Result<()> {
    let summary = analyze_files(logs)?;

    match output {
        Some(path) => {
            write_summary_to(&summary, path)?;
            report::print_summary(&summary);
            println!("\nSummary written to {}", path.display());
        }
        None => {
            // stdout carries the JSON; keep it pipeable and report on stderr.
            println!("{}", summary_to_json(&summary)?);
            report::print_warnings_to_stderr(&summary);
        }
    }

    if let Some(csv_path) = csv {
        write_sessions_csv(&summary, csv_path)?;
        eprintln!("Sessions CSV written to {}", csv_path.display());
    }

    Ok(())
}
