//! CSV reader
//!
//! Many decoder tools export their trace view as CSV instead of a workbook.
//! Fields are typed with [`Cell::from_field`]; rows with a different field
//! count than the header are accepted.

use super::{header_names, TableReader};
use crate::types::{Cell, DashboardError, Result, Table};

/// CSV reader using the `csv` crate
pub struct CsvReader;

impl TableReader for CsvReader {
    fn read(bytes: &[u8]) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| DashboardError::TableParseError(e.to_string()))?;
        let mut table = Table::new(header_names(headers.iter().map(str::to_string)));

        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                DashboardError::TableParseError(format!("row {}: {}", line + 1, e))
            })?;
            table.push_row(record.iter().map(Cell::from_field).collect());
        }

        log::debug!("CSV parsed: {} data rows", table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "Timestamp,CAN ID,Decoded\n\
                    0.010,0x419,\"Battery Current: -12.5, RSOC: 87\"\n\
                    0.020,0x100,Other\n";
        let table = CsvReader::read(data.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["Timestamp", "CAN ID", "Decoded"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "Timestamp"), Some(&Cell::Number(0.01)));
        assert_eq!(table.get(0, "CAN ID"), Some(&Cell::Text("0x419".into())));
        assert_eq!(
            table.get(0, "Decoded").map(|c| c.to_string()),
            Some("Battery Current: -12.5, RSOC: 87".to_string())
        );
    }

    #[test]
    fn test_ragged_rows() {
        let data = "a,b,c\n1\n1,2,3,4\n";
        let table = CsvReader::read(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "c"), Some(&Cell::Empty));
        assert_eq!(table.rows()[1].cells().len(), 3);
    }

    #[test]
    fn test_header_only() {
        let table = CsvReader::read(b"Time,CAN ID\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }
}
