//! Row filtering by CAN identifier
//!
//! Keeps the records whose identifier columns mention the target ID. The
//! identifier columns are located by exact header name; the match on their
//! values is a case-insensitive substring test, so `"0X419"`,
//! `"0x419 (BMS_Status)"` and `"BMS 0x419"` all match `0x419`.

use crate::types::{Record, Table};

/// Selects the records belonging to one CAN identifier
#[derive(Debug, Clone)]
pub struct RowFilter {
    /// Lowercased target identifier
    needle: String,
    /// Original target identifier, for diagnostics
    target: String,
    /// Header names searched for the identifier
    columns: Vec<String>,
}

impl RowFilter {
    /// Create a filter for `target` searching the given columns
    pub fn new(target: impl Into<String>, columns: Vec<String>) -> Self {
        let target = target.into();
        Self {
            needle: target.to_lowercase(),
            target,
            columns,
        }
    }

    /// The identifier this filter looks for
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Return the matching records in their original order
    ///
    /// Identifier columns missing from the table count as empty strings, so
    /// a table with none of them yields an empty result rather than an error.
    /// An empty result is a normal outcome; callers decide how to report it.
    pub fn apply(&self, table: &Table) -> Table {
        let indices: Vec<usize> = self
            .columns
            .iter()
            .filter_map(|name| {
                let index = table.column_index(name);
                if index.is_none() {
                    log::debug!("Identifier column {:?} not present, treated as empty", name);
                }
                index
            })
            .collect();

        let filtered = table.filtered(|record| self.matches(record, &indices));
        log::info!(
            "Filtered {} of {} rows for CAN ID {}",
            filtered.len(),
            table.len(),
            self.target
        );
        filtered
    }

    /// True if any of the identifier cells contains the target
    fn matches(&self, record: &Record, indices: &[usize]) -> bool {
        indices
            .iter()
            .any(|&i| record.text(i).to_lowercase().contains(&self.needle))
    }
}
