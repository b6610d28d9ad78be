use anyhow::Result;
use std::path::{Path, PathBuf};
use traceboard_dashboard::{DashboardOptions, build_workbook};
use traceboard_engine::load_summary;

use crate::config::Config;
use crate::report;

pub fn handle(
    summaries: &[PathBuf],
    output: &Path,
    title: Option<String>,
    config: &Config,
) -> Result<()> {
    let mut loaded = Vec::new();
    for path in summaries {
        loaded.push(load_summary(path)?);
    }

    let mut options = DashboardOptions::default();
    if let Some(title) = title.or_else(|| config.dashboard.title.clone()) {
        options.title = title;
    }
    options.sheets = config.dashboard.sheets.clone();

    let outcome = build_workbook(loaded, output, &options)?;

    report::print_build_outcome(&outcome);
    println!("Dashboard written to {}", output.display());
    Ok(())
}
