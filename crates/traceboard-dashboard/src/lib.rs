// NOTE: Builder Architecture Rationale
//
// Why a grid model in front of the xlsx writer?
// - The workbook is a pure projection of the metrics summary; building it as
//   typed cells first keeps every number testable without opening an xlsx
// - Formatting stays declarative (widths, header styling, percent columns)
//   and can never alter a value
//
// Why named ranges for chart bindings?
// - Charts and share formulas must keep recalculating when a consumer edits
//   the underlying counts; a range definition shared between the defined
//   name, the formulas, and the chart series means regenerated data and
//   bindings can never drift apart
//
// Why per-sheet isolation?
// - Each sheet renders into its own standalone worksheet and is only pushed
//   into the workbook on success, so one failing sheet costs exactly that
//   sheet and never the report

pub mod builder;
pub mod grid;
pub mod ranges;
pub mod sheets;
mod style;

pub use builder::{BuildOutcome, DashboardOptions, build_workbook};
pub use grid::{Cell, SheetGrid};
pub use ranges::NamedRange;
