//! CSV ingestion integration tests

mod common;

use std::io::Write;

use benford_io::{CsvTable, IngestOptions, IoError};
use benford_stats::SignificanceLevel;
use common::fixtures::{fixture_path, load_fixture_bytes, load_table};
use encoding_rs::{UTF_16LE, UTF_8, WINDOWS_1252};

// === Encoding and dialect ===

#[test]
fn test_utf8_comma_file() {
    let table = load_table("ledger.csv");

    assert_eq!(table.filename(), "ledger.csv");
    assert_eq!(table.encoding(), UTF_8);
    assert_eq!(table.dialect().delimiter, b',');
    assert_eq!(table.len(), 10);
}

#[test]
fn test_latin1_semicolon_file() {
    let table = load_table("latin1.csv");

    assert_eq!(table.encoding(), WINDOWS_1252);
    assert_eq!(table.dialect().delimiter, b';');
    assert_eq!(table.dump(0, Some(1))[0][0], "région");
    assert_eq!(table.viable_columns(), vec![1, 2]);
}

#[test]
fn test_utf16_tab_file() {
    let table = load_table("utf16.csv");

    assert_eq!(table.encoding(), UTF_16LE);
    assert_eq!(table.dialect().delimiter, b'\t');
    assert_eq!(table.dump(3, Some(4))[0][0], "Tromsø");

    let reading = table.column_analysis(1).unwrap();
    assert_eq!(reading.name, "reading");
    assert_eq!(reading.analysis.n, 4);
    let observed: Vec<u64> = reading.analysis.observed_distribution.values().to_vec();
    assert_eq!(observed, vec![0, 0, 1, 1, 1, 0, 1, 0, 0]);
}

#[test]
fn test_small_dialect_sample_still_sniffs() {
    let options = IngestOptions {
        dialect_sample_bytes: 40,
        ..IngestOptions::default()
    };
    let table = CsvTable::open(fixture_path("fibonacci.csv"), &options).unwrap();
    assert_eq!(table.dialect().delimiter, b',');
    assert_eq!(table.len(), 151);
}

// === Preview ===

#[test]
fn test_ledger_preview() {
    let preview = load_table("ledger.csv").preview();

    assert_eq!(preview.num_rows, 10);
    // "$1,100.00" without quotes splits into an extra field
    assert_eq!(preview.num_discarded, 1);
    assert_eq!(preview.preview_data.len(), 6);
    assert_eq!(preview.preview_data[0], vec!["date", "vendor", "amount", "quantity"]);
    assert_eq!(preview.preview_data[3][1], "Carter, Inc.");
    assert_eq!(preview.viable_column_indices, vec![2, 3]);
}

#[test]
fn test_text_only_file_has_no_viable_columns() {
    let table = load_table("words.csv");
    assert!(table.viable_columns().is_empty());
    assert!(table.analyze_viable_columns().is_empty());
}

// === Analysis ===

#[test]
fn test_ledger_column_analysis() {
    let table = load_table("ledger.csv");

    let amount = table.column_analysis(2).unwrap();
    assert_eq!(amount.name, "amount");
    assert_eq!(amount.analysis.n, 8);
    assert_eq!(amount.analysis.discarded, 1);

    let quantity = table.column_analysis(3).unwrap();
    assert_eq!(quantity.name, "quantity");
    assert_eq!(quantity.analysis.n, 7);
    assert_eq!(quantity.analysis.discarded, 2);
}

#[test]
fn test_fibonacci_file_conforms() {
    let table = load_table("fibonacci.csv");
    let columns = table.analyze_viable_columns();
    assert_eq!(columns.len(), 2);

    let fibonacci = &columns[1];
    assert_eq!(fibonacci.name, "fibonacci");
    assert_eq!(fibonacci.analysis.n, 150);
    assert!(fibonacci.analysis.test_statistic < 2.0);
    assert!(!fibonacci.analysis.rejected_at(SignificanceLevel::P10));
}

#[test]
fn test_analysis_json_for_callers() {
    let table = load_table("ledger.csv");
    let json = serde_json::to_value(table.analyze_viable_columns()).unwrap();

    assert_eq!(json[0]["name"], "amount");
    assert_eq!(json[0]["index"], 2);
    assert_eq!(json[0]["observedDistribution"]["1"], 4);
    assert_eq!(json[1]["name"], "quantity");
    assert_eq!(json[1]["criticalValues"]["0.05"], 15.507);
}

// === Errors ===

#[test]
fn test_missing_file() {
    let err = CsvTable::open(fixture_path("nope.csv"), &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound(_)));
}

#[test]
fn test_open_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&load_fixture_bytes("ledger.csv")).unwrap();
    file.flush().unwrap();

    let table = CsvTable::open(file.path(), &IngestOptions::default()).unwrap();
    assert_eq!(table.len(), 10);
}
