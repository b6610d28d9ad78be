/// One typed cell of a sheet grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// A live expression; written as a formula so external tools recalculate
    /// it when the underlying cells change.
    Formula(String),
    Empty,
}

impl Cell {
    pub fn text(value: impl AsRef<str>) -> Self {
        Cell::Text(value.as_ref().to_string())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        Cell::Number(value.into())
    }
}

/// A named sheet: optional title banner, one header row, and a grid of typed
/// cells, plus declarative formatting (column widths, percent columns).
#[derive(Debug, Clone)]
pub struct SheetGrid {
    pub name: String,
    /// Banner above the header row; only the overview sheet uses one.
    pub title: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub column_widths: Vec<f64>,
    /// Columns whose formula cells render with a percent number format.
    pub percent_columns: Vec<u16>,
    pub freeze_header: bool,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, header: Vec<&str>, column_widths: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            title: None,
            header: header.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
            column_widths,
            percent_columns: Vec::new(),
            freeze_header: false,
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Sheet row index of the header row (0, or 1 below a title banner).
    pub fn header_row(&self) -> u32 {
        if self.title.is_some() { 1 } else { 0 }
    }

    /// Sheet row index of the first data row.
    pub fn data_start_row(&self) -> u32 {
        self.header_row() + 1
    }

    /// Sheet row index of the last data row, if any data exists.
    pub fn data_end_row(&self) -> Option<u32> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.data_start_row() + self.rows.len() as u32 - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_offsets_with_and_without_title() {
        let mut plain = SheetGrid::new("Tools", vec!["Tool", "Calls"], vec![30.0, 12.0]);
        assert_eq!(plain.header_row(), 0);
        assert_eq!(plain.data_start_row(), 1);
        assert_eq!(plain.data_end_row(), None);

        plain.push_row(vec![Cell::text("search"), Cell::number(2)]);
        assert_eq!(plain.data_end_row(), Some(1));

        let mut titled = SheetGrid::new("Overview", vec!["Metric", "Value"], vec![30.0, 20.0]);
        titled.title = Some("Session Dashboard".to_string());
        titled.push_row(vec![Cell::text("Sessions"), Cell::number(3)]);
        assert_eq!(titled.header_row(), 1);
        assert_eq!(titled.data_start_row(), 2);
        assert_eq!(titled.data_end_row(), Some(2));
    }
}
