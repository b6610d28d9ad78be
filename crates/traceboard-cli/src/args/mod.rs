mod commands;

pub use commands::*;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "traceboard")]
#[command(about = "Analyze agent session logs and build spreadsheet dashboards", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a traceboard config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
