//! Whole-column Benford analysis
//!
//! Ties the pipeline together: clean a column of raw text into leading
//! digits, build the expected and observed distributions, and test the fit
//! at every tabulated significance level.

use serde::{Deserialize, Serialize};

use crate::critical::{critical_values, LevelMap, SignificanceLevel};
use crate::digit::{clean_column, Digit};
use crate::distribution::{
    expected_distribution, goodness_of_fit, observed_distribution, sum_chi_squares,
    ExpectedDistribution, ObservedDistribution,
};

/// Result of testing one column against Benford's Law
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenfordAnalysis {
    /// Number of values that produced a leading digit
    pub n: usize,
    /// Number of values that did not
    #[serde(default)]
    pub discarded: usize,
    /// Counts predicted by Benford's Law for `n` values
    pub expected_distribution: ExpectedDistribution,
    /// Counts actually seen
    pub observed_distribution: ObservedDistribution,
    /// Pearson's chi-square statistic (infinite when `n` is zero, `null` in JSON)
    #[serde(with = "infinite_as_null")]
    pub test_statistic: f64,
    /// Critical values the statistic was compared against
    pub critical_values: LevelMap<f64>,
    /// `true` where the statistic exceeds the critical value
    pub goodness_of_fit: LevelMap<bool>,
}

/// JSON has no infinity; the degenerate statistic travels as `null`
mod infinite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl BenfordAnalysis {
    /// Analyse digits that have already been extracted
    pub fn from_digits(digits: &[Digit]) -> Self {
        let expected = expected_distribution(digits.len());
        let observed = observed_distribution(digits);

        Self {
            n: digits.len(),
            discarded: 0,
            test_statistic: sum_chi_squares(&expected, &observed),
            goodness_of_fit: goodness_of_fit(&expected, &observed),
            critical_values: critical_values(),
            expected_distribution: expected,
            observed_distribution: observed,
        }
    }

    /// Whether Benford's Law is rejected at `level`
    pub fn rejected_at(&self, level: SignificanceLevel) -> bool {
        self.goodness_of_fit.get(level)
    }

    /// The strictest level at which Benford's Law is rejected, if any
    pub fn strictest_rejection(&self) -> Option<SignificanceLevel> {
        self.goodness_of_fit
            .iter()
            .filter(|&(_, rejected)| rejected)
            .map(|(level, _)| level)
            .last()
    }

    /// Whether the data is consistent with Benford's Law at every level
    pub fn conforms(&self) -> bool {
        self.strictest_rejection().is_none()
    }
}

/// Analyse one column of raw text values
///
/// Malformed values are skipped and counted in
/// [`BenfordAnalysis::discarded`]; this never fails.
pub fn analyze<I, S>(column: I) -> BenfordAnalysis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cleaned = clean_column(column);
    let mut analysis = BenfordAnalysis::from_digits(&cleaned.digits);
    analysis.discarded = cleaned.discarded;

    tracing::debug!(
        n = analysis.n,
        discarded = analysis.discarded,
        statistic = analysis.test_statistic,
        "computed chi-square"
    );

    analysis
}

/// Goodness-of-fit verdicts for a column of raw text values
pub fn conforms_to_benford<I, S>(column: I) -> LevelMap<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    analyze(column).goodness_of_fit
}
