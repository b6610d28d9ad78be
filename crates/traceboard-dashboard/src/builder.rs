use rust_xlsxwriter::{Chart, ChartType, Formula, Workbook, Worksheet, XlsxError};
use std::path::Path;
use traceboard_engine::merge_summaries;
use traceboard_types::{Error, MetricsSummary, Result};

use crate::grid::Cell;
use crate::sheets::{ChartKind, ChartSpec, SheetDef, compose_sheets};
use crate::style::{header_format, percent_format, title_format};

/// Options controlling workbook composition.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Banner title on the overview sheet.
    pub title: String,
    /// Optional subset of sheet names to render (case-insensitive). `None`
    /// renders the full fixed set.
    pub sheets: Option<Vec<String>>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            title: "Session Analysis Dashboard".to_string(),
            sheets: None,
        }
    }
}

/// What a build produced: the sheets written and any per-sheet failures.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub sheets_written: Vec<String>,
    pub warnings: Vec<String>,
}

/// Merge the given summaries and write one workbook to `path`.
///
/// Sheets render independently: a sheet that fails is reported in the
/// outcome's warnings and the rest still render. Zero summaries and an
/// unwritable destination are the only fatal cases.
pub fn build_workbook(
    summaries: Vec<MetricsSummary>,
    path: &Path,
    options: &DashboardOptions,
) -> Result<BuildOutcome> {
    let summary = merge_summaries(summaries)?;

    let mut workbook = Workbook::new();
    let mut outcome = BuildOutcome::default();

    for def in compose_sheets(&summary, &options.title) {
        if !sheet_selected(&def, options) {
            continue;
        }
        match render_sheet(&def) {
            Ok(worksheet) => {
                workbook.push_worksheet(worksheet);
                // Defined names only for sheets that actually exist, so no
                // name can dangle into a skipped sheet.
                for range in &def.names {
                    if let Err(e) = workbook.define_name(range.name.as_str(), range.formula().as_str()) {
                        outcome
                            .warnings
                            .push(format!("defined name '{}' skipped: {}", range.name, e));
                    }
                }
                outcome.sheets_written.push(def.grid.name.clone());
            }
            Err(e) => {
                outcome
                    .warnings
                    .push(format!("sheet '{}' skipped: {}", def.grid.name, e));
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| Error::output(path, e.to_string()))?;

    Ok(outcome)
}

fn sheet_selected(def: &SheetDef, options: &DashboardOptions) -> bool {
    match &options.sheets {
        None => true,
        Some(selected) => selected
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&def.grid.name)),
    }
}

fn render_sheet(def: &SheetDef) -> std::result::Result<Worksheet, XlsxError> {
    let grid = &def.grid;
    let mut worksheet = Worksheet::new();
    worksheet.set_name(grid.name.as_str())?;

    let header_fmt = header_format();
    let percent_fmt = percent_format();

    if let Some(title) = &grid.title {
        let last_col = grid.header.len().saturating_sub(1) as u16;
        worksheet.merge_range(0, 0, 0, last_col, title.as_str(), &title_format())?;
    }

    for (col, heading) in grid.header.iter().enumerate() {
        worksheet.write_string_with_format(
            grid.header_row(),
            col as u16,
            heading.as_str(),
            &header_fmt,
        )?;
    }

    for (i, row) in grid.rows.iter().enumerate() {
        let sheet_row = grid.data_start_row() + i as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(sheet_row, col, text.as_str())?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(sheet_row, col, *value)?;
                }
                Cell::Formula(formula) => {
                    if grid.percent_columns.contains(&col) {
                        worksheet.write_formula_with_format(
                            sheet_row,
                            col,
                            Formula::new(formula.as_str()),
                            &percent_fmt,
                        )?;
                    } else {
                        worksheet.write_formula(sheet_row, col, Formula::new(formula.as_str()))?;
                    }
                }
                Cell::Empty => {}
            }
        }
    }

    for (col, width) in grid.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    if grid.freeze_header {
        worksheet.set_freeze_panes(grid.data_start_row(), 0)?;
    }

    for spec in &def.charts {
        let chart = build_chart(spec);
        worksheet.insert_chart(spec.insert_at.0, spec.insert_at.1, &chart)?;
    }

    Ok(worksheet)
}

fn build_chart(spec: &ChartSpec) -> Chart {
    let chart_type = match spec.kind {
        ChartKind::Column => ChartType::Column,
        ChartKind::Pie => ChartType::Pie,
        ChartKind::Line => ChartType::Line,
    };

    let mut chart = Chart::new(chart_type);
    chart
        .add_series()
        .set_categories(&spec.categories.chart_range())
        .set_values(&spec.values.chart_range())
        .set_name(spec.title.as_str());
    chart.title().set_name(spec.title.as_str());

    if let Some(name) = &spec.x_axis {
        chart.x_axis().set_name(name.as_str());
    }
    if let Some(name) = &spec.y_axis {
        chart.y_axis().set_name(name.as_str());
    }

    chart
}
