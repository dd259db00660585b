//! Pipeline configuration types
//!
//! This module defines everything the pipeline can be tuned with: the target
//! identifier, the column heuristics, the extraction labels and the chart
//! appearance. Defaults reproduce the battery dashboard for CAN ID 0x419.

use serde::{Deserialize, Serialize};

/// Configuration for the telemetry pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// CAN identifier to keep (case-insensitive substring match)
    #[serde(default = "default_target_id")]
    pub target_id: String,

    /// Columns searched for the identifier, looked up by exact name
    #[serde(default = "default_id_columns")]
    pub id_columns: Vec<String>,

    /// Substring identifying the time column by name
    #[serde(default = "default_time_keyword")]
    pub time_keyword: String,

    /// Substring identifying the decoded-summary column by first-row content
    #[serde(default = "default_decoded_marker")]
    pub decoded_marker: String,

    /// Label preceding the signed current value
    #[serde(default = "default_current_label")]
    pub current_label: String,

    /// Label preceding the RSOC percentage
    #[serde(default = "default_rsoc_label")]
    pub rsoc_label: String,

    /// Name of the appended current column
    #[serde(default = "default_current_column")]
    pub current_column: String,

    /// Name of the appended RSOC column
    #[serde(default = "default_rsoc_column")]
    pub rsoc_column: String,

    /// Chart appearance
    #[serde(default)]
    pub chart: ChartConfig,
}

fn default_target_id() -> String {
    "0x419".to_string()
}

fn default_id_columns() -> Vec<String> {
    vec!["CAN ID".to_string(), "Decoded Name".to_string()]
}

fn default_time_keyword() -> String {
    "time".to_string()
}

fn default_decoded_marker() -> String {
    "battery current".to_string()
}

fn default_current_label() -> String {
    "Battery Current:".to_string()
}

fn default_rsoc_label() -> String {
    "RSOC:".to_string()
}

fn default_current_column() -> String {
    "Battery Current".to_string()
}

fn default_rsoc_column() -> String {
    "RSOC".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            target_id: default_target_id(),
            id_columns: default_id_columns(),
            time_keyword: default_time_keyword(),
            decoded_marker: default_decoded_marker(),
            current_label: default_current_label(),
            rsoc_label: default_rsoc_label(),
            current_column: default_current_column(),
            rsoc_column: default_rsoc_column(),
            chart: ChartConfig::default(),
        }
    }
}

/// Chart appearance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Chart title (default: derived from the target identifier)
    #[serde(default)]
    pub title: Option<String>,

    /// Primary axis description
    #[serde(default = "default_current_axis")]
    pub current_axis_label: String,

    /// Secondary axis description
    #[serde(default = "default_rsoc_axis")]
    pub rsoc_axis_label: String,

    /// Maximum number of time labels on the horizontal axis
    #[serde(default = "default_max_time_labels")]
    pub max_time_labels: usize,
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    600
}

fn default_current_axis() -> String {
    "Battery Current (A)".to_string()
}

fn default_rsoc_axis() -> String {
    "RSOC (%)".to_string()
}

fn default_max_time_labels() -> usize {
    10
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: None,
            current_axis_label: default_current_axis(),
            rsoc_axis_label: default_rsoc_axis(),
            max_time_labels: default_max_time_labels(),
        }
    }
}

impl DashboardConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the target CAN identifier
    pub fn with_target_id(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = target_id.into();
        self
    }

    /// Builder method: set the identifier columns
    pub fn with_id_columns(mut self, columns: Vec<String>) -> Self {
        self.id_columns = columns;
        self
    }

    /// Builder method: set the time column keyword
    pub fn with_time_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.time_keyword = keyword.into();
        self
    }

    /// Builder method: set the decoded-summary marker
    pub fn with_decoded_marker(mut self, marker: impl Into<String>) -> Self {
        self.decoded_marker = marker.into();
        self
    }

    /// Builder method: set both extraction labels
    pub fn with_labels(mut self, current: impl Into<String>, rsoc: impl Into<String>) -> Self {
        self.current_label = current.into();
        self.rsoc_label = rsoc.into();
        self
    }

    /// Builder method: set the chart size
    pub fn with_chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart.width = width;
        self.chart.height = height;
        self
    }

    /// Builder method: set a fixed chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.chart.title = Some(title.into());
        self
    }

    /// The chart title: configured one, or derived from the target identifier
    pub fn chart_title(&self) -> String {
        match &self.chart.title {
            Some(title) => title.clone(),
            None => format!(
                "{} and {} from CAN ID {}",
                self.current_column, self.rsoc_column, self.target_id
            ),
        }
    }
}
