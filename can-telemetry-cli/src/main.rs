//! CAN Telemetry CLI Application
//!
//! This is the command-line shell around the can-telemetry library.
//! It adds everything the library leaves out:
//! - Reading the spreadsheet from disk
//! - TOML configuration and flag overrides
//! - Writing the SVG chart
//! - Printing the preview table (TXT/JSON)
//! - Turning any failure into a single diagnostic line

use anyhow::{Context, Result};
use can_telemetry::Dashboard;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, PreviewFormat};

/// CAN Telemetry - Plot battery current and RSOC from decoded CAN exports
#[derive(Parser, Debug)]
#[command(name = "can-telemetry-cli")]
#[command(about = "Plot battery current and RSOC from a decoded CAN export (XLSX, XLS, CSV)", long_about = None)]
#[command(version)]
struct Args {
    /// Decoded CAN export to process
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// CAN identifier to plot (default: 0x419)
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Output file for the SVG chart (default: <input>_dashboard.svg)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the preview table as JSON
    #[arg(long)]
    json: bool,

    /// Maximum number of preview rows to print
    #[arg(long, value_name = "COUNT")]
    rows: Option<usize>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("CAN Telemetry CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using telemetry library v{}", can_telemetry::VERSION);

    // Every failure ends here as one diagnostic
    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Load configuration, run the pipeline, write the chart and print the preview
fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    apply_overrides(&mut config, args);

    let dashboard =
        Dashboard::new(config.dashboard.clone()).context("Invalid dashboard configuration")?;

    let output = dashboard.run_file(&args.input)?;
    if !args.quiet {
        println!("✓ File processed: {:?}", args.input);
        println!(
            "  CAN ID {}: {} samples",
            config.dashboard.target_id,
            output.augmented.len()
        );
    }

    let chart_path = config.output.chart_path_for(&args.input);
    fs::write(&chart_path, output.chart.svg())
        .with_context(|| format!("Failed to write chart: {:?}", chart_path))?;
    if !args.quiet {
        println!("📈 Chart written: {:?}\n", chart_path);
    }

    let preview = report::format_preview(
        &output.preview,
        config.output.preview_format,
        config.output.preview_rows,
    )?;
    println!("{}", preview);

    Ok(())
}

/// Command-line flags take precedence over the configuration file
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(id) = &args.id {
        config.dashboard.target_id = id.clone();
    }
    if let Some(output) = &args.output {
        config.output.chart_path = Some(output.clone());
    }
    if args.json {
        config.output.preview_format = PreviewFormat::Json;
    }
    if let Some(rows) = args.rows {
        config.output.preview_rows = Some(rows);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
