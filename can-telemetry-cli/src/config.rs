//! Configuration loading and parsing

use anyhow::{Context, Result};
use can_telemetry::DashboardConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where to write the SVG chart (default: next to the input)
    pub chart_path: Option<PathBuf>,
    #[serde(default)]
    pub preview_format: PreviewFormat,
    /// Maximum number of preview rows to print
    pub preview_rows: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Txt,
    Json,
}

impl OutputConfig {
    /// Chart path for an input file: configured path, or
    /// `<input stem>_dashboard.svg` beside the input
    pub fn chart_path_for(&self, input: &Path) -> PathBuf {
        if let Some(path) = &self.chart_path {
            return path.clone();
        }
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("can_telemetry");
        input.with_file_name(format!("{}_dashboard.svg", stem))
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    log::debug!("Target CAN ID from config: {}", config.dashboard.target_id);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [dashboard]
            target_id = "0x3A0"
            id_columns = ["ID"]

            [dashboard.chart]
            width = 1600
            title = "Pack telemetry"

            [output]
            chart_path = "out/pack.svg"
            preview_format = "json"
            preview_rows = 20
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.dashboard.target_id, "0x3A0");
        assert_eq!(config.dashboard.id_columns, vec!["ID"]);
        assert_eq!(config.dashboard.time_keyword, "time");
        assert_eq!(config.dashboard.chart.width, 1600);
        assert_eq!(config.dashboard.chart.height, 600);
        assert_eq!(config.dashboard.chart_title(), "Pack telemetry");
        assert_eq!(config.output.preview_format, PreviewFormat::Json);
        assert_eq!(config.output.preview_rows, Some(20));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.dashboard, DashboardConfig::default());
        assert_eq!(config.output.preview_format, PreviewFormat::Txt);
        assert!(config.output.chart_path.is_none());
    }

    #[test]
    fn test_chart_path_for_input() {
        let output = OutputConfig::default();
        assert_eq!(
            output.chart_path_for(Path::new("logs/drive_01.xlsx")),
            PathBuf::from("logs/drive_01_dashboard.svg")
        );

        let output = OutputConfig {
            chart_path: Some(PathBuf::from("chart.svg")),
            ..Default::default()
        };
        assert_eq!(
            output.chart_path_for(Path::new("logs/drive_01.xlsx")),
            PathBuf::from("chart.svg")
        );
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\ntarget_id = \"0x420\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.dashboard.target_id, "0x420");

        assert!(load_config(Path::new("/nonexistent/config.toml")).is_err());
    }
}
