//! CSV output

use crate::output::traits::{Cell, OutputResult, TableWriter};
use std::path::Path;

/// Writes tables as UTF-8 comma-separated files
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_table(&self, path: &Path, headers: &[&str], rows: &[Vec<Cell>]) -> OutputResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row.iter().map(Cell::to_text))?;
        }
        writer.flush()?;
        Ok(())
    }
}
