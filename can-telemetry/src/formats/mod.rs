//! Spreadsheet readers (XLSX/XLS, CSV)
//!
//! This module turns an uploaded file's bytes into a [`Table`]. Each reader
//! treats the first row as the header and every following row as a record.

use crate::types::{DashboardError, Result, Table};
use std::path::Path;

pub mod delimited;
pub mod excel;

// Re-export reader types
pub use delimited::CsvReader;
pub use excel::ExcelReader;

/// Common trait for all table readers
///
/// Readers work on in-memory bytes; opening files is left to the caller.
pub trait TableReader {
    /// Parse the bytes of a spreadsheet into a table
    fn read(bytes: &[u8]) -> Result<Table>;
}

/// Container formats accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Excel workbook (.xlsx, .xlsm, .xlsb, .xls) or OpenDocument (.ods)
    Excel,
    /// Comma-separated values
    Csv,
}

impl TableFormat {
    /// Determine the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                Ok(TableFormat::Excel)
            }
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(DashboardError::UnsupportedFormat(format!(
                "{:?} (expected .xlsx, .xls or .csv)",
                path
            ))),
        }
    }
}

/// Parse spreadsheet bytes with the reader for `format`
pub fn read_table(bytes: &[u8], format: TableFormat) -> Result<Table> {
    let table = match format {
        TableFormat::Excel => ExcelReader::read(bytes)?,
        TableFormat::Csv => CsvReader::read(bytes)?,
    };
    log::info!(
        "Read {} rows x {} columns ({:?})",
        table.len(),
        table.columns().len(),
        format
    );
    Ok(table)
}

/// Normalise header cells: blank names become `Unnamed: <index>`
pub(crate) fn header_names<I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    cells
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim().to_string();
            if name.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("log.xlsx")).unwrap(), TableFormat::Excel);
        assert_eq!(TableFormat::from_path(Path::new("LOG.XLS")).unwrap(), TableFormat::Excel);
        assert_eq!(TableFormat::from_path(Path::new("log.csv")).unwrap(), TableFormat::Csv);
    }

    #[test]
    fn test_unsupported_file_format() {
        let result = TableFormat::from_path(Path::new("trace.blf"));
        assert!(matches!(result, Err(DashboardError::UnsupportedFormat(_))));

        let result = TableFormat::from_path(Path::new("no_extension"));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_headers_are_named() {
        let names = header_names(vec!["Time".to_string(), "  ".to_string(), "Data".to_string()]);
        assert_eq!(names, vec!["Time", "Unnamed: 1", "Data"]);
    }
}
