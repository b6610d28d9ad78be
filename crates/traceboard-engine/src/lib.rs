// NOTE: Analyzer Architecture Rationale
//
// Why skip-and-count (not fail-fast parsing)?
// - Session logs are appended by live tooling and routinely carry truncated
//   or half-written lines
// - One malformed record must never cost the rest of the file
// - Every skip is counted in the summary's diagnostics section, so partial
//   data always leaves a trace
//
// Why merge-then-recompute (not incremental counters)?
// - Summaries combine in arbitrary order (multi-file runs, re-analysis,
//   dashboard-side merging)
// - Recomputing the rollup from the unioned per-session records makes the
//   result order-independent and immune to double counting
// - Self-merge is idempotent because files dedupe by content fingerprint
//
// Why a single analysis path for one file and many?
// - `analyze_files` builds a per-file summary and folds them through the same
//   `merge_summaries` the dashboard stage uses, so both stages share one
//   union rule

mod schema;

pub mod analyze;
pub mod assembler;
pub mod export;
pub mod merge;
pub mod reader;
pub mod rollup;

pub use analyze::analyze_files;
pub use export::{load_summary, summary_to_json, write_sessions_csv, write_summary_to};
pub use merge::merge_summaries;
pub use reader::{ParsedLog, read_log_file};
pub use rollup::compute_rollup;
