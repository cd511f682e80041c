//! Leading significant digit extraction
//!
//! Turns raw cell text such as `"$10,000"` or `"-0.25"` into the first
//! non-zero digit of the number it spells:
//!
//! - [`parse_numeric`] strips grouping commas and a currency sign and checks
//!   that what is left is a real-number literal
//! - [`first_digit`] scans the normalized text for its first significant digit
//! - [`clean_column`] applies both to a whole column, dropping anything that
//!   does not yield a digit

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a token cannot produce a leading significant digit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token is not a real-number literal once decoration is removed
    #[error("not a number: {0:?}")]
    NotNumeric(String),

    /// The token is numeric but has no significant digit (e.g. `"0.0"`)
    #[error("no significant digit in {0:?}")]
    NoSignificantDigit(String),

    /// A digit outside 1..=9 was supplied
    #[error("digit out of range: {0}")]
    OutOfRange(u8),
}

/// A leading significant digit, always in `1..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Number of leading-digit categories
    pub const COUNT: usize = 9;

    /// Create a digit, rejecting anything outside `1..=9`
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if (1..=9).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ParseError::OutOfRange(value))
        }
    }

    /// All digits in ascending order
    pub fn all() -> impl Iterator<Item = Digit> {
        (1..=9).map(Digit)
    }

    /// Numeric value of the digit
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot used by fixed-size per-digit tables
    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Inverse of [`Digit::index`]; `index` must be below [`Digit::COUNT`]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::COUNT);
        Self(index as u8 + 1)
    }

    fn from_ascii(c: char) -> Option<Self> {
        match c {
            '1'..='9' => Some(Self(c as u8 - b'0')),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Digit {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a raw token into a signed decimal numeral
///
/// All commas are removed and a single `$` is stripped from the leading
/// decoration, whether it comes before or after the sign (`"$-1"` and
/// `"-$1"` both become `"-1"`). The sign itself is kept. Whatever follows
/// the leading minus signs must parse as an `f64` literal.
///
/// The result is returned as text so that digit order is preserved for
/// [`first_digit`].
pub fn parse_numeric(token: &str) -> Result<String, ParseError> {
    let sans_commas: String = token.chars().filter(|&c| c != ',').collect();

    let body_start = sans_commas.len() - sans_commas.trim_start_matches('-').len();
    let (sign, body) = sans_commas.split_at(body_start);
    let body = body.strip_prefix('$').unwrap_or(body);

    if body.parse::<f64>().is_err() {
        return Err(ParseError::NotNumeric(token.to_string()));
    }

    Ok(format!("{sign}{body}"))
}

/// Get the first significant digit of a raw token
///
/// Signs, decimal points and leading zeroes are skipped. Any other
/// character before the first non-zero digit, or running out of
/// characters, is an error.
pub fn first_digit(token: &str) -> Result<Digit, ParseError> {
    let numeral = parse_numeric(token)?;

    for c in numeral.chars() {
        if let Some(digit) = Digit::from_ascii(c) {
            return Ok(digit);
        }
        if !matches!(c, '-' | '.' | '0') {
            break;
        }
    }

    Err(ParseError::NoSignificantDigit(token.to_string()))
}

/// Leading digits collected from one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedColumn {
    /// Successfully extracted digits, in column order
    pub digits: Vec<Digit>,
    /// Number of tokens that produced no digit
    pub discarded: usize,
}

impl CleanedColumn {
    /// Number of usable digits
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Check whether no token produced a digit
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Total number of tokens seen
    pub fn total(&self) -> usize {
        self.digits.len() + self.discarded
    }
}

/// Extract the leading digit of every token in a column
///
/// Never fails: tokens without a digit are counted in
/// [`CleanedColumn::discarded`] and otherwise ignored.
pub fn clean_column<I, S>(column: I) -> CleanedColumn
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned = CleanedColumn::default();

    for token in column {
        match first_digit(token.as_ref()) {
            Ok(digit) => cleaned.digits.push(digit),
            Err(e) => {
                tracing::trace!("skipping token: {}", e);
                cleaned.discarded += 1;
            }
        }
    }

    cleaned
}

/// Extract the leading digits of a column, dropping malformed tokens
pub fn clean_digits<I, S>(column: I) -> Vec<Digit>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    clean_column(column).digits
}
