//! Options and report types for tabular ingestion

use benford_stats::BenfordAnalysis;
use serde::{Deserialize, Serialize};

/// How much of a file to inspect when loading it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Leading bytes used to detect the character encoding
    pub encoding_sample_bytes: usize,
    /// Leading bytes of decoded text used to sniff the dialect
    pub dialect_sample_bytes: usize,
    /// Maximum number of rows in a preview
    pub preview_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            encoding_sample_bytes: 10_000,
            dialect_sample_bytes: 1024,
            preview_rows: 6,
        }
    }
}

/// First look at a loaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Total number of rows, header included
    pub num_rows: usize,
    /// Rows dropped for having a different field count than the first row
    pub num_discarded: usize,
    /// Leading viable rows
    pub preview_data: Vec<Vec<String>>,
    /// Columns whose values are all numeric or blank
    pub viable_column_indices: Vec<usize>,
}

/// Benford analysis of one table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAnalysis {
    /// Column name, taken from the first row
    pub name: String,
    /// Zero-based column index
    pub index: usize,
    #[serde(flatten)]
    pub analysis: BenfordAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_options_partial_toml_style_json() {
        let options: IngestOptions = serde_json::from_str(r#"{"preview_rows": 10}"#).unwrap();
        assert_eq!(options.preview_rows, 10);
        assert_eq!(options.encoding_sample_bytes, 10_000);
        assert_eq!(options.dialect_sample_bytes, 1024);
    }

    #[test]
    fn test_preview_camel_case() {
        let preview = Preview {
            num_rows: 3,
            num_discarded: 1,
            preview_data: vec![vec!["a".to_string()]],
            viable_column_indices: vec![0],
        };
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["numRows"], 3);
        assert_eq!(json["numDiscarded"], 1);
        assert_eq!(json["viableColumnIndices"][0], 0);
    }

    #[test]
    fn test_column_analysis_is_flat() {
        let column = ColumnAnalysis {
            name: "amount".to_string(),
            index: 2,
            analysis: benford_stats::analyze(["12", "15", "3"]),
        };
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["name"], "amount");
        assert_eq!(json["index"], 2);
        assert_eq!(json["n"], 3);
        assert_eq!(json["observedDistribution"]["1"], 2);
    }

    #[test]
    fn test_empty_column_analysis_reads_back() {
        let column = ColumnAnalysis {
            name: "notes".to_string(),
            index: 0,
            analysis: benford_stats::analyze(["notes", "n/a"]),
        };
        let json = serde_json::to_string(&column).unwrap();
        let back: ColumnAnalysis = serde_json::from_str(&json).unwrap();

        assert_eq!(back.analysis.test_statistic, f64::INFINITY);
        assert_eq!(back, column);
    }
}
