// End-to-end runs of the telemetry pipeline through the public API
use can_telemetry::{
    Cell, ColumnResolver, Dashboard, DashboardConfig, DashboardError, DualAxisRenderer,
    FieldExtractor, RowFilter, SeriesAligner, Table,
};
use std::io::Write;

const EXPORT: &str = "\
Timestamp,CAN ID,Decoded Name,Decoded Summary
2024-05-01 10:00:00.000,0x419,BMS_Status,\"BMS_Status: Battery Current: -12.5 A, RSOC: 87 %\"
2024-05-01 10:00:00.050,0x120,MCU_Status,\"Motor Speed: 1200 rpm\"
2024-05-01 10:00:00.100,0X419,BMS_Status,\"RSOC: 86 %, Battery Current: -11.75 A\"
2024-05-01 10:00:00.150,0x419,BMS_Status,\"Frame truncated\"
2024-05-01 10:00:00.200,0x3A0,0x419 forwarded,\"Battery Current: 3 A\"
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_temp(contents: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn table(columns: &[&str], rows: Vec<Vec<&str>>) -> Table {
    Table::with_rows(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.into_iter()
            .map(|r| r.into_iter().map(Cell::from).collect())
            .collect(),
    )
}

#[test]
fn test_run_file_csv_export() {
    init_logging();
    let file = write_temp(EXPORT.as_bytes(), ".csv");
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();

    let output = dashboard.run_file(file.path()).unwrap();
    let augmented = &output.augmented;

    // Four rows mention 0x419 (one only through "Decoded Name")
    assert_eq!(augmented.len(), 4);
    assert_eq!(augmented.time_column(), "Timestamp");
    assert_eq!(augmented.resolved().decoded_name, "Decoded Summary");
    assert_eq!(
        augmented.current_series(),
        vec![Some(-12.5), Some(-11.75), None, Some(3.0)]
    );
    assert_eq!(augmented.rsoc_series(), vec![Some(87.0), Some(86.0), None, None]);
    assert_eq!(
        augmented.time_labels()[0],
        "2024-05-01 10:00:00.000".to_string()
    );

    assert!(output.chart.svg().contains("Battery Current (A)"));
    assert!(output.chart.svg().contains("RSOC (%)"));
}

#[test]
fn test_preview_json() {
    init_logging();
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();
    let output = dashboard
        .run_bytes(EXPORT.as_bytes(), can_telemetry::TableFormat::Csv)
        .unwrap();

    let json = serde_json::to_value(&output.preview).unwrap();
    assert_eq!(json["columns"][0], "Timestamp");
    assert_eq!(json["columns"][1], "Battery Current");
    assert_eq!(json["columns"][2], "RSOC");
    assert_eq!(json["rows"][0]["current"], -12.5);
    assert_eq!(json["rows"][0]["rsoc"], 87.0);
    assert!(json["rows"][2]["current"].is_null());
}

#[test]
fn test_no_matching_rows_file() {
    init_logging();
    let data = "Timestamp,CAN ID,Decoded\n1,0x100,Battery Current: 1\n";
    let file = write_temp(data.as_bytes(), ".csv");
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();

    let err = dashboard.run_file(file.path()).unwrap_err();
    assert!(matches!(err, DashboardError::NoMatchingRows(_)));
    assert_eq!(err.to_string(), "No rows matching CAN ID 0x419 found");
}

#[test]
fn test_run_bytes_excel_export() {
    init_logging();
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();
    let output = dashboard
        .run_bytes(
            include_bytes!("fixtures/bms_export.xlsx"),
            can_telemetry::TableFormat::Excel,
        )
        .unwrap();
    let augmented = &output.augmented;

    assert_eq!(augmented.len(), 2);
    assert_eq!(augmented.time_column(), "Time");
    assert_eq!(augmented.resolved().decoded_name, "Decoded Summary");
    assert_eq!(augmented.current_series(), vec![Some(-12.5), Some(-11.75)]);
    assert_eq!(augmented.rsoc_series(), vec![Some(87.0), Some(86.0)]);
    assert_eq!(
        augmented.time_labels(),
        vec!["2024-05-01 10:00:00".to_string(), "2024-05-01 10:00:02".to_string()]
    );

    assert_eq!(output.preview.rows[1].time, "2024-05-01 10:00:02");
    assert!(output.chart.svg().contains("2024-05-01 10:00:00"));
}

#[test]
fn test_run_file_excel_export() {
    init_logging();
    let file = write_temp(include_bytes!("fixtures/bms_export.xlsx"), ".xlsx");
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();

    let output = dashboard.run_file(file.path()).unwrap();
    assert_eq!(output.augmented.len(), 2);
}

#[test]
fn test_empty_workbook() {
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();
    let err = dashboard
        .run_bytes(
            include_bytes!("fixtures/empty_sheet.xlsx"),
            can_telemetry::TableFormat::Excel,
        )
        .unwrap_err();
    assert!(matches!(err, DashboardError::NoMatchingRows(_)));
}

#[test]
fn test_corrupt_workbook() {
    init_logging();
    let file = write_temp(b"PK\x03\x04 definitely not a zip archive", ".xlsx");
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();

    let err = dashboard.run_file(file.path()).unwrap_err();
    assert!(matches!(err, DashboardError::TableParseError(_)));
    assert!(err.to_string().starts_with("Failed to parse spreadsheet"));
}

#[test]
fn test_missing_file() {
    let dashboard = Dashboard::new(DashboardConfig::new()).unwrap();
    let err = dashboard
        .run_file(std::path::Path::new("/nonexistent/decoded.xlsx"))
        .unwrap_err();
    assert!(matches!(err, DashboardError::IoError(_)));
}

#[test]
fn test_stages_individually() {
    let input = table(
        &["Timestamp", "CAN ID", "Decoded Name", "Summary"],
        vec![
            vec!["t0", "", "0x419 decoded", "Battery Current: -12.5, RSOC: 87"],
            vec!["t1", "0x200", "Other", "Battery Current: 1, RSOC: 1"],
            vec!["t2", "0X419", "", "no labels"],
        ],
    );

    let filter = RowFilter::new("0x419", vec!["CAN ID".into(), "Decoded Name".into()]);
    let filtered = filter.apply(&input);
    assert_eq!(filtered.len(), 2);

    let resolved = ColumnResolver::new("time", "battery current")
        .resolve(&filtered)
        .unwrap();
    assert_eq!(resolved.time_name, "Timestamp");
    assert_eq!(resolved.decoded_name, "Summary");

    let extractor = FieldExtractor::new("Battery Current:", "RSOC:").unwrap();
    let before = filtered.len();
    let augmented = SeriesAligner::new(&extractor, "Battery Current", "RSOC")
        .align(filtered, resolved);
    assert_eq!(augmented.len(), before);
    assert_eq!(augmented.current_series(), vec![Some(-12.5), None]);

    let chart = DualAxisRenderer::new(Default::default(), "test")
        .render(&augmented)
        .unwrap();
    assert!(chart.svg().contains("<svg"));
}

#[test]
fn test_labels_with_regex_metacharacters() {
    // Escaped labels always compile, so construction succeeds for odd labels
    let config = DashboardConfig::new().with_labels("[Current", "(SOC");
    assert!(Dashboard::new(config).is_ok());
}
