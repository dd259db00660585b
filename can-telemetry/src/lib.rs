//! CAN Telemetry Library
//!
//! A stateless library that turns a spreadsheet export of decoded CAN log
//! records into a dual-axis chart of battery current and RSOC.
//!
//! # Architecture
//!
//! The pipeline runs strictly forward:
//! - Reads the first worksheet (XLSX/XLS) or a CSV export into a table
//! - Keeps the records whose identifier columns mention the target CAN ID
//! - Finds the time column by name and the decoded-summary column by content
//! - Extracts the labeled current and RSOC values from each summary
//! - Renders both series against one time axis with independent y-scales
//!
//! The library does NOT:
//! - Decode raw CAN frames (the input is already decoded text)
//! - Write files or keep state between runs
//! - Display anything (the SVG chart and preview table go back to the caller)
//!
//! File handling, output and diagnostics presentation live in the
//! application layer (can-telemetry-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use can_telemetry::{Dashboard, DashboardConfig, TableFormat};
//!
//! let config = DashboardConfig::new()
//!     .with_target_id("0x419")
//!     .with_chart_size(1600, 800);
//! let dashboard = Dashboard::new(config).unwrap();
//!
//! let bytes = std::fs::read("decoded_can.xlsx").unwrap();
//! match dashboard.run_bytes(&bytes, TableFormat::Excel) {
//!     Ok(output) => {
//!         std::fs::write("dashboard.svg", output.chart.svg()).unwrap();
//!         println!("{}", output.preview);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

// Public modules
pub mod config;
pub mod dashboard;
pub mod types;

// Re-export main types for convenience
pub use align::SeriesAligner;
pub use columns::ColumnResolver;
pub use config::{ChartConfig, DashboardConfig};
pub use dashboard::{Dashboard, DashboardOutput};
pub use extract::FieldExtractor;
pub use filter::RowFilter;
pub use formats::{read_table, TableFormat};
pub use render::{Chart, DualAxisRenderer};
pub use types::{
    AugmentedRow, AugmentedTable, Cell, DashboardError, ExtractedFields, MissingColumns,
    PreviewRow, PreviewTable, Record, RequiredColumn, ResolvedColumns, Result, Table,
};

// Pipeline stages (types re-exported above)
mod align;
mod columns;
mod extract;
mod filter;
mod formats;
mod render;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: the default pipeline builds
        let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();
        assert_eq!(dashboard.config().target_id, "0x419");
    }
}
