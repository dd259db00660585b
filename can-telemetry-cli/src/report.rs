//! Preview table output (TXT/JSON)

use crate::config::PreviewFormat;
use anyhow::{Context, Result};
use can_telemetry::PreviewTable;

/// Format the preview table, optionally limited to the first `limit` rows
pub fn format_preview(
    preview: &PreviewTable,
    format: PreviewFormat,
    limit: Option<usize>,
) -> Result<String> {
    let total = preview.rows.len();
    let shown = match limit {
        Some(n) => preview.truncated(n),
        None => preview.clone(),
    };

    match format {
        PreviewFormat::Txt => {
            let mut text = shown.to_string();
            if shown.rows.len() < total {
                text.push_str(&format!("\n({} of {} rows shown)", shown.rows.len(), total));
            }
            Ok(text)
        }
        PreviewFormat::Json => {
            serde_json::to_string_pretty(&shown).context("Failed to serialize preview table")
        }
    }
}
