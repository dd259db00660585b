//! Main pipeline API
//!
//! This module provides the primary interface of the library. A [`Dashboard`]
//! is built once from a [`DashboardConfig`] and then turns any number of
//! inputs into a chart plus a preview table. Every run is independent: all
//! intermediate tables are created, used and dropped within the call.

use crate::align::SeriesAligner;
use crate::columns::ColumnResolver;
use crate::config::DashboardConfig;
use crate::extract::FieldExtractor;
use crate::filter::RowFilter;
use crate::formats::{read_table, TableFormat};
use crate::render::{Chart, DualAxisRenderer};
use crate::types::{AugmentedTable, DashboardError, PreviewTable, Result, Table};
use std::path::Path;

/// Everything a run hands back to the hosting shell
#[derive(Debug, Clone)]
pub struct DashboardOutput {
    /// The rendered dual-axis chart
    pub chart: Chart,
    /// Time, current and RSOC columns for tabular display
    pub preview: PreviewTable,
    /// The full filtered table with the extracted columns appended
    pub augmented: AugmentedTable,
}

/// The telemetry pipeline - entry point for all processing
pub struct Dashboard {
    config: DashboardConfig,
    filter: RowFilter,
    resolver: ColumnResolver,
    extractor: FieldExtractor,
    renderer: DualAxisRenderer,
}

impl Dashboard {
    /// Build the pipeline stages from a configuration
    ///
    /// # Returns
    /// * `Err(DashboardError::InvalidPattern)` if the extraction labels do
    ///   not form a valid pattern
    ///
    /// # Example
    /// ```no_run
    /// use can_telemetry::{Dashboard, DashboardConfig};
    /// use std::path::Path;
    ///
    /// let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();
    /// let output = dashboard.run_file(Path::new("decoded_can.xlsx")).unwrap();
    /// println!("{}", output.preview);
    /// ```
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let filter = RowFilter::new(config.target_id.clone(), config.id_columns.clone());
        let resolver = ColumnResolver::new(config.time_keyword.clone(), config.decoded_marker.clone());
        let extractor = FieldExtractor::new(&config.current_label, &config.rsoc_label)?;
        let renderer = DualAxisRenderer::new(config.chart.clone(), config.chart_title());

        Ok(Self {
            config,
            filter,
            resolver,
            extractor,
            renderer,
        })
    }

    /// The configuration this pipeline was built from
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Run the pipeline on an already parsed table
    ///
    /// Stages: filter → resolve columns → extract and align → render.
    /// An empty filter result stops the run with `NoMatchingRows` before
    /// column resolution is attempted.
    pub fn run(&self, table: &Table) -> Result<DashboardOutput> {
        let filtered = self.filter.apply(table);
        if filtered.is_empty() {
            return Err(DashboardError::NoMatchingRows(self.filter.target().to_string()));
        }

        let resolved = self.resolver.resolve(&filtered)?;
        log::info!(
            "Using time column {:?} and decoded column {:?}",
            resolved.time_name,
            resolved.decoded_name
        );

        let aligner = SeriesAligner::new(
            &self.extractor,
            &self.config.current_column,
            &self.config.rsoc_column,
        );
        let augmented = aligner.align(filtered, resolved);

        let chart = self.renderer.render(&augmented)?;
        let preview = augmented.preview();
        log::info!("Dashboard ready: {} samples", augmented.len());

        Ok(DashboardOutput {
            chart,
            preview,
            augmented,
        })
    }

    /// Parse spreadsheet bytes and run the pipeline
    pub fn run_bytes(&self, bytes: &[u8], format: TableFormat) -> Result<DashboardOutput> {
        let table = read_table(bytes, format)?;
        self.run(&table)
    }

    /// Read a spreadsheet file and run the pipeline
    ///
    /// The format is chosen from the file extension.
    pub fn run_file(&self, path: &Path) -> Result<DashboardOutput> {
        log::info!("Loading spreadsheet: {:?}", path);
        let format = TableFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        self.run_bytes(&bytes, format)
    }
}
