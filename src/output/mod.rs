//! Output module for exporting harvested records
//!
//! Two tables are produced from the same record set:
//! - the full export, every record
//! - the filtered export, records matching the [`FilterCriteria`]
//!
//! Both omit the internal country-of-origin field.

mod csv_writer;
mod traits;
mod xlsx_writer;

pub use csv_writer::CsvWriter;
pub use traits::{Cell, OutputError, OutputResult, TableWriter};
pub use xlsx_writer::XlsxWriter;

use crate::config::{OutputConfig, OutputFormat};
use crate::product::{FilterCriteria, ProductRecord, EXPORT_COLUMNS};
use std::path::{Path, PathBuf};

/// Paths and row counts of a finished export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub full_path: PathBuf,
    pub full_rows: usize,
    pub filtered_path: PathBuf,
    pub filtered_rows: usize,
}

/// Returns the writer for an output format
pub fn writer_for(format: OutputFormat) -> Box<dyn TableWriter> {
    match format {
        OutputFormat::Xlsx => Box::new(XlsxWriter),
        OutputFormat::Csv => Box::new(CsvWriter),
    }
}

/// Converts a record to an export row, in [`EXPORT_COLUMNS`] order
///
/// The country of origin is not part of the row.
pub fn record_to_row(record: &ProductRecord) -> Vec<Cell> {
    let row = vec![
        Cell::from(record.product_url.clone()),
        Cell::from(record.article_id.clone()),
        Cell::from(record.title.clone()),
        Cell::from(record.price),
        Cell::from(record.description.clone()),
        Cell::from(record.joined_images()),
        Cell::from(record.joined_characteristics()),
        Cell::from(record.seller_name.clone()),
        Cell::from(record.seller_url.clone()),
        Cell::from(record.joined_sizes()),
        Cell::from(record.stock_count),
        Cell::from(record.rating),
        Cell::from(record.feedback_count),
    ];
    debug_assert_eq!(row.len(), ProductRecord::FIELD_COUNT - 1);
    row
}

/// Writes the full and filtered exports
///
/// The filtered export is written even when no record qualifies, as a
/// header-only table.
///
/// # Arguments
///
/// * `records` - All collected records, in crawl order
/// * `criteria` - Selection rule for the filtered export
/// * `config` - Target directory, file stems and format
pub fn export_records(
    records: &[ProductRecord],
    criteria: &FilterCriteria,
    config: &OutputConfig,
) -> OutputResult<ExportSummary> {
    let writer = writer_for(config.format);
    export_with(writer.as_ref(), records, criteria, config)
}

/// Same as [`export_records`] with an explicit writer
pub fn export_with(
    writer: &dyn TableWriter,
    records: &[ProductRecord],
    criteria: &FilterCriteria,
    config: &OutputConfig,
) -> OutputResult<ExportSummary> {
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory)?;

    let full_path = directory.join(format!("{}.{}", config.full_name, writer.extension()));
    let filtered_path = directory.join(format!("{}.{}", config.filtered_name, writer.extension()));

    let full_rows: Vec<Vec<Cell>> = records.iter().map(record_to_row).collect();
    writer.write_table(&full_path, &EXPORT_COLUMNS, &full_rows)?;

    let filtered_rows: Vec<Vec<Cell>> = criteria
        .select(records)
        .into_iter()
        .map(record_to_row)
        .collect();
    writer.write_table(&filtered_path, &EXPORT_COLUMNS, &filtered_rows)?;

    Ok(ExportSummary {
        full_path,
        full_rows: full_rows.len(),
        filtered_path,
        filtered_rows: filtered_rows.len(),
    })
}
