use anyhow::Result;
use std::path::PathBuf;
use traceboard_engine::analyze::summarize_log;
use traceboard_engine::read_log_file;

use crate::report;

pub fn handle(logs: &[PathBuf]) -> Result<()> {
    let mut readable = 0usize;

    for (i, path) in logs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match read_log_file(path) {
            Ok(log) => {
                readable += 1;
                let summary = summarize_log(log);
                report::print_check_ok(path, &summary);
            }
            Err(err) => report::print_check_unreadable(path, &err),
        }
    }

    if readable == 0 {
        anyhow::bail!("no readable log file among {} given", logs.len());
    }
    Ok(())
}
