//! CSV dialect sniffing
//!
//! Guesses the field delimiter and quote character from a leading sample of
//! decoded text. Delimiters are scored by how often and how consistently
//! they appear per line, ignoring anything inside quotes. A delimiter that
//! is always followed by a space marks a file written as `a, b`.

use serde::{Deserialize, Serialize};

use crate::error::{IoError, IoResult};

/// Delimiters tried when sniffing, in tie-break order
pub const DELIMITER_CANDIDATES: [u8; 5] = [b',', b'\t', b';', b'|', b':'];

const QUOTE_CANDIDATES: [u8; 2] = [b'"', b'\''];

/// Field delimiter and quote character of a CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// Whitespace around each field is not part of the value
    #[serde(default)]
    pub skip_initial_space: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            skip_initial_space: false,
        }
    }
}

impl Dialect {
    /// Human-readable name of the delimiter
    pub fn delimiter_name(&self) -> String {
        match self.delimiter {
            b'\t' => "tab".to_string(),
            other => (other as char).to_string(),
        }
    }
}

/// Guess the dialect of a text sample
///
/// When `truncated` is set the sample was cut from a longer file, so its
/// last line is likely partial and is ignored. A sample in which no
/// candidate delimiter appears is taken to be a single-column file.
pub fn sniff(sample: &str, truncated: bool) -> IoResult<Dialect> {
    let mut lines: Vec<&str> = sample.lines().collect();
    if truncated && lines.len() > 1 {
        lines.pop();
    }
    lines.retain(|line| !line.trim().is_empty());

    if lines.is_empty() {
        return Err(IoError::InvalidFormat(
            "Could not determine dialect: sample is empty".to_string(),
        ));
    }

    let quote = guess_quote(&lines);

    let mut best: Option<(u8, f64)> = None;
    for &delimiter in &DELIMITER_CANDIDATES {
        let score = consistency_score(&lines, delimiter, quote);
        if score > 0.0 && best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((delimiter, score));
        }
    }

    let dialect = match best {
        Some((delimiter, score)) => {
            let skip_initial_space = always_followed_by_space(&lines, delimiter, quote);
            tracing::debug!(
                delimiter = %(delimiter as char).escape_default(),
                score,
                skip_initial_space,
                "sniffed delimiter"
            );
            Dialect {
                delimiter,
                quote,
                skip_initial_space,
            }
        }
        None => {
            tracing::debug!("no delimiter found, treating file as a single column");
            Dialect {
                quote,
                ..Dialect::default()
            }
        }
    };

    Ok(dialect)
}

/// Mean count per line divided by one plus its standard deviation
fn consistency_score(lines: &[&str], delimiter: u8, quote: u8) -> f64 {
    let counts: Vec<f64> = lines
        .iter()
        .map(|line| count_unquoted(line, delimiter, quote) as f64)
        .collect();

    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

    mean / (1.0 + variance.sqrt())
}

/// Positions of `delimiter` outside quotes
fn unquoted_positions(line: &str, delimiter: u8, quote: u8) -> Vec<usize> {
    let mut in_quotes = false;
    let mut positions = Vec::new();
    for (i, &b) in line.as_bytes().iter().enumerate() {
        if b == quote {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            positions.push(i);
        }
    }
    positions
}

fn count_unquoted(line: &str, delimiter: u8, quote: u8) -> usize {
    unquoted_positions(line, delimiter, quote).len()
}

/// Whether every unquoted `delimiter` in the sample is followed by a space
fn always_followed_by_space(lines: &[&str], delimiter: u8, quote: u8) -> bool {
    let mut seen = 0;
    for line in lines {
        let bytes = line.as_bytes();
        for i in unquoted_positions(line, delimiter, quote) {
            if bytes.get(i + 1) != Some(&b' ') {
                return false;
            }
            seen += 1;
        }
    }
    seen > 0
}

/// Pick the quote character seen most often at field boundaries
fn guess_quote(lines: &[&str]) -> u8 {
    let is_boundary = |b: Option<&u8>| match b {
        None => true,
        Some(b) => DELIMITER_CANDIDATES.contains(b) || b.is_ascii_whitespace(),
    };

    let boundary_quotes = |quote: u8| -> usize {
        lines
            .iter()
            .map(|line| {
                let bytes = line.as_bytes();
                (0..bytes.len())
                    .filter(|&i| bytes[i] == quote)
                    .filter(|&i| {
                        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
                        is_boundary(before) || is_boundary(bytes.get(i + 1))
                    })
                    .count()
            })
            .sum()
    };

    let mut best = (QUOTE_CANDIDATES[0], 0);
    for &quote in &QUOTE_CANDIDATES {
        let seen = boundary_quotes(quote);
        if seen > best.1 {
            best = (quote, seen);
        }
    }
    best.0
}
