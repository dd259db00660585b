//! Series alignment
//!
//! Appends the extracted values to their records. This is a row-wise map:
//! every filtered record produces exactly one output row, in the same order,
//! whether or not anything could be extracted from it.

use crate::extract::FieldExtractor;
use crate::types::{AugmentedRow, AugmentedTable, ResolvedColumns, Table};

/// Attaches extracted fields to the filtered records
#[derive(Debug)]
pub struct SeriesAligner<'a> {
    extractor: &'a FieldExtractor,
    current_column: &'a str,
    rsoc_column: &'a str,
}

impl<'a> SeriesAligner<'a> {
    /// Create an aligner that appends columns with the given names
    pub fn new(extractor: &'a FieldExtractor, current_column: &'a str, rsoc_column: &'a str) -> Self {
        Self {
            extractor,
            current_column,
            rsoc_column,
        }
    }

    /// Build the augmented table from the filtered records
    ///
    /// # Arguments
    /// * `table` - Filtered table (consumed; records move into the output)
    /// * `resolved` - Column roles resolved for this table
    pub fn align(&self, table: Table, resolved: ResolvedColumns) -> AugmentedTable {
        let (columns, records) = table.into_parts();
        let mut misses = 0usize;

        let rows: Vec<AugmentedRow> = records
            .into_iter()
            .map(|record| {
                let text = record.text(resolved.decoded_index);
                let fields = self.extractor.extract(&text);
                if fields.is_empty() {
                    misses += 1;
                    log::trace!("No values found in {:?}", text);
                }
                AugmentedRow { record, fields }
            })
            .collect();

        if misses > 0 {
            log::warn!(
                "{} of {} rows had neither {} nor {} value",
                misses,
                rows.len(),
                self.current_column,
                self.rsoc_column
            );
        }

        AugmentedTable::new(
            columns,
            rows,
            resolved,
            self.current_column.to_string(),
            self.rsoc_column.to_string(),
        )
    }
}
