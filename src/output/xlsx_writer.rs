//! Excel workbook output

use crate::output::traits::{Cell, OutputResult, TableWriter};
use rust_xlsxwriter::{Format, Workbook};
use std::borrow::Cow;
use std::path::Path;

/// Longest string a worksheet cell accepts, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Cuts `value` to at most [`MAX_CELL_CHARS`] characters
///
/// Truncation happens on a `char` boundary; shorter values are borrowed.
pub fn fit_cell_text(value: &str) -> Cow<'_, str> {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => Cow::Owned(value[..cut].to_string()),
        None => Cow::Borrowed(value),
    }
}

/// Writes tables as single-sheet `.xlsx` workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl TableWriter for XlsxWriter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write_table(&self, path: &Path, headers: &[&str], rows: &[Vec<Cell>]) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        for (col_idx, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col_idx as u16, *header, &bold)?;
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let sheet_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col = col_idx as u16;
                match cell {
                    Cell::Text(value) => {
                        let text = fit_cell_text(value);
                        if let Cow::Owned(_) = text {
                            tracing::warn!(
                                "Truncated cell at row {}, column '{}' from {} to {} characters",
                                sheet_row,
                                headers.get(col_idx).copied().unwrap_or("?"),
                                value.chars().count(),
                                MAX_CELL_CHARS
                            );
                        }
                        worksheet.write_string(sheet_row, col, text.as_ref())?;
                    }
                    Cell::Integer(value) => {
                        worksheet.write_number(sheet_row, col, *value as f64)?;
                    }
                    Cell::Float(value) => {
                        worksheet.write_number(sheet_row, col, *value)?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.xlsx");
        let rows = vec![vec![
            Cell::Text("https://example.com/1".to_string()),
            Cell::Integer(9000),
            Cell::Float(4.7),
            Cell::Empty,
        ]];

        XlsxWriter
            .write_table(&path, &["Ссылка", "Цена", "Рейтинг", "Остатки"], &rows)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_fit_cell_text_cuts_on_char_boundary() {
        let long = "ш".repeat(MAX_CELL_CHARS + 10);
        let fitted = fit_cell_text(&long);
        assert!(matches!(fitted, Cow::Owned(_)));
        assert_eq!(fitted.chars().count(), MAX_CELL_CHARS);

        let exact = "a".repeat(MAX_CELL_CHARS);
        assert!(matches!(fit_cell_text(&exact), Cow::Borrowed(_)));
        assert_eq!(fit_cell_text("short"), "short");
    }

    #[test]
    fn test_oversized_text_is_written_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.xlsx");
        let rows = vec![vec![Cell::Text("ш".repeat(40_000)), Cell::Integer(1)]];

        XlsxWriter
            .write_table(&path, &["Описание", "Цена"], &rows)
            .unwrap();

        assert!(path.exists());
    }
}
