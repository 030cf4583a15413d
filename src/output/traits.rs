//! Output writer traits and types
//!
//! This module defines the trait interface for table writers and the cell
//! values they receive.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One typed table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Float(f64),
    /// Absent value, written as a blank cell
    Empty,
}

impl Cell {
    /// Text rendering used by text-only formats
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<u64>> for Cell {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Empty, Self::Integer)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Float)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Empty, Self::Text)
    }
}

/// Trait for table writers
///
/// A writer persists one header row followed by data rows to a single file.
pub trait TableWriter {
    /// File extension produced by this writer, without the dot
    fn extension(&self) -> &'static str;

    /// Writes `headers` and `rows` to `path`, replacing any existing file
    fn write_table(&self, path: &Path, headers: &[&str], rows: &[Vec<Cell>]) -> OutputResult<()>;
}
