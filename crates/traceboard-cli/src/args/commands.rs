use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Analyze session event logs into a metrics summary")]
    Analyze {
        #[arg(required = true, help = "Log files to analyze (shell globs expand here)")]
        logs: Vec<PathBuf>,

        #[arg(long, help = "Write the summary JSON here instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Also write the per-session table as CSV")]
        csv: Option<PathBuf>,
    },

    #[command(about = "Render metrics summaries into a multi-sheet workbook")]
    Dashboard {
        #[arg(required = true, help = "Summary files produced by 'analyze'")]
        summaries: Vec<PathBuf>,

        #[arg(long, help = "Destination workbook path (.xlsx)")]
        output: PathBuf,

        #[arg(long, help = "Title shown on the overview sheet")]
        title: Option<String>,
    },

    #[command(about = "Check that log files parse cleanly")]
    Check {
        #[arg(required = true, help = "Log files to check")]
        logs: Vec<PathBuf>,
    },
}
