//! In-memory CSV table with encoding and dialect detection

use std::fs;
use std::path::Path;

use benford_stats::{analyze, parse_numeric};
use encoding_rs::Encoding;

use crate::dialect::{sniff, Dialect};
use crate::encoding::{decode, detect_encoding};
use crate::error::{IoError, IoResult};
use crate::schema::{ColumnAnalysis, IngestOptions, Preview};

/// A decoded CSV file, held as rows of text
#[derive(Debug, Clone)]
pub struct CsvTable {
    filename: String,
    encoding: &'static Encoding,
    dialect: Dialect,
    rows: Vec<Vec<String>>,
    preview_rows: usize,
}

impl CsvTable {
    /// Load a CSV file from disk
    pub fn open(path: impl AsRef<Path>, options: &IngestOptions) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.display().to_string()));
        }

        let bytes = fs::read(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_bytes(filename, &bytes, options)
    }

    /// Load a CSV file from raw bytes
    ///
    /// Detects the encoding from the first `encoding_sample_bytes`, decodes
    /// the whole file strictly, sniffs the dialect from the first
    /// `dialect_sample_bytes` of text and parses every record.
    pub fn from_bytes(
        filename: impl Into<String>,
        bytes: &[u8],
        options: &IngestOptions,
    ) -> IoResult<Self> {
        let filename = filename.into();
        if bytes.is_empty() {
            return Err(IoError::InvalidFormat(format!("{} is empty", filename)));
        }

        let sample = &bytes[..bytes.len().min(options.encoding_sample_bytes)];
        let encoding = detect_encoding(sample);
        let text = decode(bytes, encoding)?;

        let sample_end = floor_char_boundary(&text, options.dialect_sample_bytes);
        let dialect = sniff(&text[..sample_end], sample_end < text.len())?;

        let rows = parse_rows(&text, dialect)?;

        tracing::info!(
            filename = %filename,
            encoding = encoding.name(),
            delimiter = %dialect.delimiter_name(),
            rows = rows.len(),
            "loaded csv"
        );

        Ok(Self {
            filename,
            encoding,
            dialect,
            rows,
            preview_rows: options.preview_rows,
        })
    }

    /// File name the table was loaded from
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Detected character encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Detected dialect
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Number of rows, header included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in `start..end`, clamped to the table; `None` means to the end
    pub fn dump(&self, start: usize, end: Option<usize>) -> &[Vec<String>] {
        let end = end.unwrap_or(self.rows.len()).min(self.rows.len());
        let start = start.min(end);
        &self.rows[start..end]
    }

    /// Rows with the same number of fields as the first row
    pub fn viable_rows(&self) -> Vec<&[String]> {
        let Some(width) = self.rows.first().map(Vec::len) else {
            return Vec::new();
        };

        self.rows
            .iter()
            .filter(|row| row.len() == width)
            .map(Vec::as_slice)
            .collect()
    }

    /// Indices of columns whose values are all numeric or blank
    ///
    /// The first row is assumed to be a header and is not checked.
    pub fn viable_columns(&self) -> Vec<usize> {
        let rows = self.viable_rows();
        let Some(header) = rows.first() else {
            return Vec::new();
        };

        (0..header.len())
            .filter(|&index| {
                rows[1..]
                    .iter()
                    .all(|row| is_numeric_or_blank(&row[index]))
            })
            .collect()
    }

    /// Row counts, leading rows and viable columns
    pub fn preview(&self) -> Preview {
        let viable = self.viable_rows();
        let num_rows = self.len();

        Preview {
            num_rows,
            num_discarded: num_rows - viable.len(),
            preview_data: viable
                .iter()
                .take(self.preview_rows)
                .map(|row| row.to_vec())
                .collect(),
            viable_column_indices: self.viable_columns(),
        }
    }

    /// Benford analysis of one column
    ///
    /// Every viable row contributes, the header included; a non-numeric
    /// header is simply discarded during cleaning.
    pub fn column_analysis(&self, index: usize) -> IoResult<ColumnAnalysis> {
        let rows = self.viable_rows();
        let num_columns = rows.first().map_or(0, |row| row.len());
        if index >= num_columns {
            return Err(IoError::ColumnNotFound { index, num_columns });
        }

        Ok(analyze_column(&rows, index))
    }

    /// Benford analysis of every viable column
    #[cfg(not(feature = "parallel"))]
    pub fn analyze_viable_columns(&self) -> Vec<ColumnAnalysis> {
        let rows = self.viable_rows();
        self.viable_columns()
            .into_iter()
            .map(|index| analyze_column(&rows, index))
            .collect()
    }

    /// Benford analysis of every viable column, one rayon task per column
    #[cfg(feature = "parallel")]
    pub fn analyze_viable_columns(&self) -> Vec<ColumnAnalysis> {
        use rayon::prelude::*;

        let rows = self.viable_rows();
        self.viable_columns()
            .into_par_iter()
            .map(|index| analyze_column(&rows, index))
            .collect()
    }
}

/// Analyse column `index` of `rows`; every row must have that column
fn analyze_column(rows: &[&[String]], index: usize) -> ColumnAnalysis {
    let name = rows[0][index].clone();
    let analysis = analyze(rows.iter().map(|row| row[index].as_str()));

    tracing::debug!(column = %name, index, "analysed table column");

    ColumnAnalysis {
        name,
        index,
        analysis,
    }
}

fn is_numeric_or_blank(value: &str) -> bool {
    value.is_empty() || parse_numeric(value).is_ok()
}

fn parse_rows(text: &str, dialect: Dialect) -> IoResult<Vec<Vec<String>>> {
    let trim = if dialect.skip_initial_space {
        csv::Trim::Fields
    } else {
        csv::Trim::None
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .trim(trim)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .enumerate()
        .map(|(i, result)| {
            let record = result.map_err(|e| {
                IoError::InvalidFormat(format!("Failed to parse CSV row {}: {}", i + 1, e))
            })?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

/// Largest char boundary in `text` that is at most `max`
fn floor_char_boundary(text: &str, max: usize) -> usize {
    let mut end = max.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}
