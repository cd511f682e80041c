//! Test fixture loading utilities

use std::path::PathBuf;

use benford_io::{CsvTable, IngestOptions};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as raw bytes
#[allow(dead_code)]
pub fn load_fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Open a fixture as a table with default options
pub fn load_table(name: &str) -> CsvTable {
    CsvTable::open(fixture_path(name), &IngestOptions::default())
        .unwrap_or_else(|e| panic!("Failed to open fixture {}: {}", name, e))
}
