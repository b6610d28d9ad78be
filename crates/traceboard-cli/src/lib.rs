// NOTE: CLI Architecture Rationale
//
// Why two decoupled commands (not one log-to-workbook shot)?
// - The metrics summary is the interchange contract: `analyze` produces it,
//   `dashboard` consumes it, and either side can be rerun or replaced alone
// - Summaries from many runs combine at dashboard time through the same
//   union rule the analyzer uses internally, so aggregation stays consistent
//
// Why stdout-by-default for the summary?
// - Shell-glob inputs and pipeable output make `traceboard analyze logs/*.jsonl
//   | jq .rollup` work without a scratch file; report lines go to stderr
//   whenever stdout is carrying JSON

mod args;
mod commands;
pub mod config;
mod handlers;
mod report;

pub use args::{Cli, Commands};
pub use commands::run;
