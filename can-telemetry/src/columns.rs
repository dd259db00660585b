//! Column role resolution
//!
//! Decoder exports do not share a schema, so the two columns the pipeline
//! needs are found heuristically:
//! - time column: first header containing the time keyword (case-insensitive)
//! - decoded-summary column: first column whose *first row* contains the
//!   decoded marker (case-insensitive)
//!
//! Only the first row is sniffed. A table whose first matching record lacks
//! the marker will not resolve even if later rows carry it.

use crate::types::{
    DashboardError, MissingColumns, RequiredColumn, ResolvedColumns, Result, Table,
};

/// Locates the time and decoded-summary columns of a table
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    time_keyword: String,
    decoded_marker: String,
}

impl ColumnResolver {
    /// Create a resolver with the given keyword and marker
    pub fn new(time_keyword: impl Into<String>, decoded_marker: impl Into<String>) -> Self {
        Self {
            time_keyword: time_keyword.into(),
            decoded_marker: decoded_marker.into(),
        }
    }

    /// Resolve both column roles
    ///
    /// # Returns
    /// * `Ok(ResolvedColumns)` if both columns were found
    /// * `Err(DashboardError::EmptyTable)` if the table has no records
    /// * `Err(DashboardError::MissingColumns)` naming each unresolved role
    pub fn resolve(&self, table: &Table) -> Result<ResolvedColumns> {
        // The content sniff needs a first row
        if table.is_empty() {
            return Err(DashboardError::EmptyTable);
        }

        let time = self.find_time_column(table);
        let decoded = self.find_decoded_column(table);

        match (time, decoded) {
            (Some(time_index), Some(decoded_index)) => {
                let resolved = ResolvedColumns {
                    time_index,
                    time_name: table.columns()[time_index].clone(),
                    decoded_index,
                    decoded_name: table.columns()[decoded_index].clone(),
                };
                log::debug!(
                    "Resolved columns: time={:?}, decoded={:?}",
                    resolved.time_name,
                    resolved.decoded_name
                );
                Ok(resolved)
            }
            (time, decoded) => {
                let mut missing = Vec::new();
                if time.is_none() {
                    missing.push(RequiredColumn::Time {
                        keyword: self.time_keyword.clone(),
                    });
                }
                if decoded.is_none() {
                    log::debug!(
                        "No column's first row contains {:?}; later rows are not inspected",
                        self.decoded_marker
                    );
                    missing.push(RequiredColumn::DecodedSummary {
                        marker: self.decoded_marker.clone(),
                    });
                }
                Err(DashboardError::MissingColumns(MissingColumns(missing)))
            }
        }
    }

    /// First column whose name contains the time keyword
    pub fn find_time_column(&self, table: &Table) -> Option<usize> {
        let keyword = self.time_keyword.to_lowercase();
        table
            .columns()
            .iter()
            .position(|name| name.to_lowercase().contains(&keyword))
    }

    /// First column whose first-row value contains the decoded marker
    pub fn find_decoded_column(&self, table: &Table) -> Option<usize> {
        let marker = self.decoded_marker.to_lowercase();
        let first = table.rows().first()?;
        (0..table.columns().len()).find(|&i| first.text(i).to_lowercase().contains(&marker))
    }
}
