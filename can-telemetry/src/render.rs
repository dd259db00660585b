//! Dual-axis chart rendering
//!
//! Draws the current series against the left axis and the RSOC series
//! against the right axis, both sharing one horizontal axis. The horizontal
//! axis is the row position; its tick labels are the time column's text, so
//! no timestamp parsing or re-ordering ever happens here.
//!
//! Missing values break a series into runs. Each run is drawn as its own
//! line; a run of a single value is drawn as a point marker.

use crate::config::ChartConfig;
use crate::types::{AugmentedTable, DashboardError, Result};
use plotters::chart::SeriesLabelPosition;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;

/// Stroke colour of the current series (left axis)
const CURRENT_COLOR: RGBColor = RGBColor(214, 39, 40);
/// Stroke colour of the RSOC series (right axis)
const RSOC_COLOR: RGBColor = RGBColor(31, 119, 180);

const FONT: &str = "sans-serif";

/// Largest magnitude placed on a value axis; keeps padded ranges finite
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

/// A rendered chart (SVG document)
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    svg: String,
    width: u32,
    height: u32,
}

impl Chart {
    /// The SVG document
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Take the SVG document
    pub fn into_svg(self) -> String {
        self.svg
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Renders an augmented table as a dual-axis line chart
#[derive(Debug, Clone)]
pub struct DualAxisRenderer {
    config: ChartConfig,
    title: String,
}

impl DualAxisRenderer {
    /// Create a renderer with the given appearance and title
    pub fn new(config: ChartConfig, title: impl Into<String>) -> Self {
        Self {
            config,
            title: title.into(),
        }
    }

    /// Render the chart in memory
    ///
    /// Total over the augmented table: any density of missing values,
    /// including none present at all, produces a chart.
    pub fn render(&self, table: &AugmentedTable) -> Result<Chart> {
        let mut svg = String::new();
        self.draw(table, &mut svg)
            .map_err(|e| DashboardError::RenderError(e.to_string()))?;

        log::debug!("Rendered chart: {} bytes of SVG", svg.len());
        Ok(Chart {
            svg,
            width: self.config.width,
            height: self.config.height,
        })
    }

    fn draw(
        &self,
        table: &AugmentedTable,
        svg: &mut String,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let labels = table.time_labels();
        let current = table.current_series();
        let rsoc = table.rsoc_series();

        // Shared horizontal axis: row positions
        let x_range = 0..labels.len().max(1);
        let label_formatter = |idx: &usize| labels.get(*idx).cloned().unwrap_or_default();

        let root = SVGBackend::with_string(svg, (self.config.width, self.config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .right_y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), value_range(&current))?
            .set_secondary_coord(x_range, value_range(&rsoc));

        chart
            .configure_mesh()
            .x_desc(table.time_column())
            .y_desc(self.config.current_axis_label.as_str())
            .x_labels(self.config.max_time_labels)
            .x_label_formatter(&label_formatter)
            .y_label_style((FONT, 12).into_font().color(&CURRENT_COLOR))
            .axis_desc_style((FONT, 14))
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc(self.config.rsoc_axis_label.as_str())
            .label_style((FONT, 12).into_font().color(&RSOC_COLOR))
            .axis_desc_style((FONT, 14))
            .draw()?;

        // Current: solid red on the primary axis
        let mut legend_added = false;
        for run in runs(&current) {
            let anno = if run.len() == 1 {
                chart.draw_series(run.into_iter().map(|p| Circle::new(p, 3, CURRENT_COLOR.filled())))?
            } else {
                chart.draw_series(LineSeries::new(run, CURRENT_COLOR.stroke_width(2)))?
            };
            if !legend_added {
                anno.label(table.current_column()).legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], CURRENT_COLOR.stroke_width(2))
                });
                legend_added = true;
            }
        }

        // RSOC: dashed blue on the secondary axis
        let mut legend_added = false;
        for run in runs(&rsoc) {
            let anno = if run.len() == 1 {
                chart.draw_secondary_series(
                    run.into_iter().map(|p| Circle::new(p, 3, RSOC_COLOR.filled())),
                )?
            } else {
                chart.draw_secondary_series(DashedLineSeries::new(
                    run,
                    8,
                    5,
                    RSOC_COLOR.stroke_width(2),
                ))?
            };
            if !legend_added {
                anno.label(table.rsoc_column()).legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], RSOC_COLOR.stroke_width(2))
                });
                legend_added = true;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 13))
            .draw()?;

        root.present()?;
        Ok(())
    }
}

/// Split a series into runs of consecutive present values
fn runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut run = Vec::new();

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => run.push((i, v.clamp(-AXIS_LIMIT, AXIS_LIMIT))),
            _ => {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
            }
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

/// Axis range covering the present values, padded so lines are not drawn
/// on the frame. An all-missing series gets a unit range.
///
/// Both ends and the width are always finite, and the padding never falls
/// below a thousandth of the values' magnitude so tick steps stay
/// representable at large magnitudes.
fn value_range(values: &[Option<f64>]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(-AXIS_LIMIT, AXIS_LIMIT))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let magnitude = min.abs().max(max.abs());
    let padding = if span < 1e-6 { 0.5 } else { span * 0.1 };
    let padding = padding.max(magnitude * 1e-3);
    (min - padding)..(max + padding)
}
