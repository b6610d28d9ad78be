use rust_xlsxwriter::ChartRange;

/// A named, single-column cell range.
///
/// One definition feeds three consumers: the workbook-level defined name, the
/// chart series binding, and any formula that sums or divides over the range.
/// Because all three derive from the same rows, regenerating the underlying
/// data can never leave a chart or formula pointing at a stale range.
#[derive(Debug, Clone)]
pub struct NamedRange {
    /// Defined-name identifier (no spaces; registered on the workbook).
    pub name: String,
    pub sheet: String,
    pub col: u16,
    pub first_row: u32,
    pub last_row: u32,
}

impl NamedRange {
    pub fn new(
        name: impl Into<String>,
        sheet: impl Into<String>,
        col: u16,
        first_row: u32,
        last_row: u32,
    ) -> Self {
        Self {
            name: name.into(),
            sheet: sheet.into(),
            col,
            first_row,
            last_row,
        }
    }

    /// Absolute A1-style reference, sheet-qualified and quoted:
    /// `='Agent Usage'!$B$2:$B$5`.
    pub fn formula(&self) -> String {
        format!(
            "='{}'!${}${}:${}${}",
            self.sheet,
            column_letter(self.col),
            self.first_row + 1,
            column_letter(self.col),
            self.last_row + 1,
        )
    }

    /// Chart-series binding over the same rows.
    pub fn chart_range(&self) -> ChartRange {
        ChartRange::new_from_range(&self.sheet, self.first_row, self.col, self.last_row, self.col)
    }
}

/// Convert a zero-based column index to its letter name.
pub fn column_letter(col: u16) -> String {
    let mut col = col as u32;
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }

    #[test]
    fn test_formula_is_absolute_and_quoted() {
        let range = NamedRange::new("agent_counts", "Agent Usage", 1, 1, 4);
        assert_eq!(range.formula(), "='Agent Usage'!$B$2:$B$5");
    }
}
