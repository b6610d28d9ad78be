use anyhow::Result;

use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { logs, output, csv } => {
            handlers::analyze::handle(&logs, output.as_deref(), csv.as_deref())
        }
        Commands::Dashboard { summaries, output, title } => {
            handlers::dashboard::handle(&summaries, &output, title, &config)
        }
        Commands::Check { logs } => handlers::check::handle(&logs),
    }
}
