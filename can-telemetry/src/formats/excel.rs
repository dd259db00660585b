//! Excel workbook reader
//!
//! Reads the first worksheet of an XLSX/XLS/ODS workbook using the
//! `calamine` crate. The container type is sniffed from the bytes, so a
//! legacy `.xls` saved with an `.xlsx` name still opens.
//!
//! ## Cell mapping
//! - Int / Float → `Cell::Number`
//! - String → `Cell::Text` (empty strings become `Cell::Empty`)
//! - DateTime / ISO date strings → `Cell::Timestamp`
//! - Error cells and blanks → `Cell::Empty`

use super::{header_names, TableReader};
use crate::types::{Cell, DashboardError, Result, Table};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;
use std::io::Cursor;

/// XLSX/XLS reader using calamine
pub struct ExcelReader;

impl TableReader for ExcelReader {
    fn read(bytes: &[u8]) -> Result<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| DashboardError::TableParseError(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                DashboardError::TableParseError("Workbook contains no worksheets".to_string())
            })?
            .map_err(|e| DashboardError::TableParseError(e.to_string()))?;

        let mut rows = range.rows();

        // First row is the header; an entirely blank sheet is an empty table
        let header = match rows.next() {
            Some(cells) => header_names(cells.iter().map(|d| convert_cell(d).to_string())),
            None => {
                log::warn!("First worksheet is empty");
                return Ok(Table::default());
            }
        };

        let mut table = Table::new(header);
        for row in rows {
            table.push_row(row.iter().map(convert_cell).collect());
        }

        log::debug!("Worksheet parsed: {} data rows", table.len());
        Ok(table)
    }
}

/// Convert a calamine cell into the pipeline's cell type
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) => Cell::Timestamp(ts),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(Cell::Timestamp)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => {
            log::trace!("Spreadsheet error cell treated as empty: {:?}", e);
            Cell::Empty
        }
        Data::Empty => Cell::Empty,
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
