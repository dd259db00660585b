//! Core types for the CAN telemetry pipeline
//!
//! This module defines the table model shared by every stage (cells, records,
//! tables), the values produced by extraction, and the error type. All of them
//! are derived fresh on every run - nothing here carries state between inputs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// A single spreadsheet cell
///
/// Exports from different decoder vendors mix text, numbers and native date
/// cells, so the value is kept dynamically typed. Every stage that inspects a
/// cell works on its string rendering (see the `Display` impl).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Free text
    Text(String),
    /// Numeric value (integers are widened to f64)
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Native spreadsheet date/time
    Timestamp(NaiveDateTime),
    /// Missing value
    #[default]
    Empty,
}

impl Cell {
    /// True if the cell holds no value
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Build a cell from a raw text field (CSV and friends)
    ///
    /// Empty fields become `Empty`, fields that parse as a number become
    /// `Number`, everything else is kept as text.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(field.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", if *v { "true" } else { "false" }),
            Cell::Timestamp(ts) => write!(f, "{}", ts),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

/// One row of an input table
///
/// Cells are stored positionally and always have the same length as the
/// owning table's header. Name lookups go through [`Table`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    cells: Vec<Cell>,
}

impl Record {
    /// Create a record from its cells
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get the cell at a column position
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// String rendering of the cell at a column position (empty if absent)
    pub fn text(&self, index: usize) -> String {
        self.get(index).map(|c| c.to_string()).unwrap_or_default()
    }

    /// All cells of this record
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A header row plus records, as read from a spreadsheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from column names and raw rows
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Append a row, padding short rows with empty cells and dropping
    /// cells beyond the header width
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Empty);
        self.rows.push(Record::new(cells));
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, matched by exact (case-sensitive) name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All records in original order
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no records
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row position and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Keep only the records matching `keep`, preserving their order
    pub fn filtered<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Record) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Record>) {
        (self.columns, self.rows)
    }
}

/// Logical column roles, resolved once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Position of the time column
    pub time_index: usize,
    /// Name of the time column
    pub time_name: String,
    /// Position of the decoded-summary column
    pub decoded_index: usize,
    /// Name of the decoded-summary column
    pub decoded_name: String,
}

/// Values extracted from one decoded-summary string
///
/// `None` means the label was not found. It is never replaced by zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Signed value following the battery current label
    pub current: Option<f64>,
    /// Percentage following the RSOC label
    pub rsoc: Option<f64>,
}

impl ExtractedFields {
    /// True if neither value was found
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.rsoc.is_none()
    }
}

/// A filtered record with its extracted fields appended
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRow {
    /// The original record, unchanged
    pub record: Record,
    /// The appended values
    pub fields: ExtractedFields,
}

/// The filtered table with the two extracted series appended
///
/// Rows keep the order of the input table. The renderer relies on that order
/// being chronological.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedTable {
    columns: Vec<String>,
    rows: Vec<AugmentedRow>,
    resolved: ResolvedColumns,
    current_column: String,
    rsoc_column: String,
}

impl AugmentedTable {
    pub(crate) fn new(
        mut columns: Vec<String>,
        rows: Vec<AugmentedRow>,
        resolved: ResolvedColumns,
        current_column: String,
        rsoc_column: String,
    ) -> Self {
        columns.push(current_column.clone());
        columns.push(rsoc_column.clone());
        Self {
            columns,
            rows,
            resolved,
            current_column,
            rsoc_column,
        }
    }

    /// Original column names followed by the two appended ones
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in input order
    pub fn rows(&self) -> &[AugmentedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The resolved column roles this table was built from
    pub fn resolved(&self) -> &ResolvedColumns {
        &self.resolved
    }

    pub fn time_column(&self) -> &str {
        &self.resolved.time_name
    }

    pub fn current_column(&self) -> &str {
        &self.current_column
    }

    pub fn rsoc_column(&self) -> &str {
        &self.rsoc_column
    }

    /// Time cell text for every row, in row order
    pub fn time_labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.record.text(self.resolved.time_index))
            .collect()
    }

    /// Battery current series, gaps as `None`
    pub fn current_series(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.fields.current).collect()
    }

    /// RSOC series, gaps as `None`
    pub fn rsoc_series(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.fields.rsoc).collect()
    }

    /// Three-column view (time, current, RSOC) for tabular display
    pub fn preview(&self) -> PreviewTable {
        PreviewTable {
            columns: vec![
                self.resolved.time_name.clone(),
                self.current_column.clone(),
                self.rsoc_column.clone(),
            ],
            rows: self
                .rows
                .iter()
                .map(|r| PreviewRow {
                    time: r.record.text(self.resolved.time_index),
                    current: r.fields.current,
                    rsoc: r.fields.rsoc,
                })
                .collect(),
        }
    }
}

/// One line of the preview table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub time: String,
    pub current: Option<f64>,
    pub rsoc: Option<f64>,
}

/// Tabular preview restricted to time, current and RSOC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewTable {
    /// Header names: time column, current column, RSOC column
    pub columns: Vec<String>,
    pub rows: Vec<PreviewRow>,
}

impl PreviewTable {
    /// Copy of this preview limited to the first `limit` rows
    pub fn truncated(&self, limit: usize) -> PreviewTable {
        PreviewTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(limit).cloned().collect(),
        }
    }
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "NaN".to_string(),
    }
}

impl fmt::Display for PreviewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<[String; 3]> = self
            .rows
            .iter()
            .map(|r| [r.time.clone(), format_value(r.current), format_value(r.rsoc)])
            .collect();

        let mut widths = [0usize; 3];
        for (i, width) in widths.iter_mut().enumerate() {
            let header = self.columns.get(i).map(|c| c.chars().count()).unwrap_or(0);
            let cells = body.iter().map(|r| r[i].chars().count()).max().unwrap_or(0);
            *width = header.max(cells);
        }

        let separator: String = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let separator = format!("+{}+", separator);

        writeln!(f, "{}", separator)?;
        write!(f, "|")?;
        for (i, width) in widths.iter().enumerate() {
            let name = self.columns.get(i).map(String::as_str).unwrap_or("");
            write!(f, " {:<width$} |", name, width = width)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", separator)?;
        for row in &body {
            write!(f, "|")?;
            for (i, width) in widths.iter().enumerate() {
                // Time left-aligned, numbers right-aligned
                if i == 0 {
                    write!(f, " {:<width$} |", row[i], width = width)?;
                } else {
                    write!(f, " {:>width$} |", row[i], width = width)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", separator)
    }
}

/// A column the pipeline needs but could not find
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredColumn {
    /// No column name contains the time keyword
    Time { keyword: String },
    /// No column's first value contains the decoded-summary marker
    DecodedSummary { marker: String },
}

impl fmt::Display for RequiredColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredColumn::Time { keyword } => {
                write!(f, "timestamp column (no column name contains \"{}\")", keyword)
            }
            RequiredColumn::DecodedSummary { marker } => write!(
                f,
                "decoded summary column (no column's first row contains \"{}\")",
                marker
            ),
        }
    }
}

/// The set of required columns that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns(pub Vec<RequiredColumn>);

impl fmt::Display for MissingColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Errors that can occur while building a dashboard
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Failed to parse spreadsheet: {0}")]
    TableParseError(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No rows matching CAN ID {0} found")]
    NoMatchingRows(String),

    #[error("Cannot resolve columns of an empty table")]
    EmptyTable,

    #[error("Required columns not found: {0}")]
    MissingColumns(MissingColumns),

    #[error("Invalid field pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to render chart: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
