//! Expected and observed leading-digit distributions
//!
//! Benford's Law predicts that digit `d` leads with probability
//! `log10(1 + 1/d)`. The functions here build the expected counts for a
//! sample of size `n`, tally the observed counts, and compare the two with
//! Pearson's chi-square statistic.

use std::collections::HashMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::critical::LevelMap;
use crate::digit::Digit;

/// One value per leading digit, iterated from 1 to 9
///
/// Serialized as an object keyed `"1"` through `"9"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitDistribution<T> {
    values: [T; Digit::COUNT],
}

/// Theoretical counts under Benford's Law
pub type ExpectedDistribution = DigitDistribution<f64>;

/// Counts of leading digits actually seen
pub type ObservedDistribution = DigitDistribution<u64>;

impl<T: Copy> DigitDistribution<T> {
    /// Build a distribution by evaluating `f` for every digit
    pub fn from_fn(mut f: impl FnMut(Digit) -> T) -> Self {
        Self {
            values: std::array::from_fn(|i| f(Digit::from_index(i))),
        }
    }

    /// Value for a digit
    pub fn get(&self, digit: Digit) -> T {
        self.values[digit.index()]
    }

    /// Iterate `(digit, value)` pairs from 1 to 9
    pub fn iter(&self) -> impl Iterator<Item = (Digit, T)> + '_ {
        Digit::all().zip(self.values.iter().copied())
    }

    /// Values ordered by digit
    pub fn values(&self) -> &[T; Digit::COUNT] {
        &self.values
    }
}

impl ObservedDistribution {
    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Observed share of each digit (all zero for an empty sample)
    pub fn proportions(&self) -> DigitDistribution<f64> {
        let total = self.total();
        DigitDistribution::from_fn(|digit| {
            if total == 0 {
                0.0
            } else {
                self.get(digit) as f64 / total as f64
            }
        })
    }
}

impl<T: Serialize> Serialize for DigitDistribution<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Digit::COUNT))?;
        for (digit, value) in Digit::all().zip(self.values.iter()) {
            map.serialize_entry(&digit.to_string(), value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Copy> Deserialize<'de> for DigitDistribution<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw: HashMap<String, T> = HashMap::deserialize(deserializer)?;

        let mut values = Vec::with_capacity(Digit::COUNT);
        for digit in Digit::all() {
            let value = raw
                .remove(&digit.to_string())
                .ok_or_else(|| D::Error::custom(format!("missing digit {}", digit)))?;
            values.push(value);
        }
        if let Some(extra) = raw.keys().next() {
            return Err(D::Error::custom(format!("unexpected digit key {:?}", extra)));
        }

        let values: [T; Digit::COUNT] = values
            .try_into()
            .map_err(|_| D::Error::custom("wrong number of digits"))?;
        Ok(Self { values })
    }
}

/// Benford probability of `digit` being the leading digit
pub fn benford(digit: Digit) -> f64 {
    (1.0 + 1.0 / f64::from(digit.get())).log10()
}

/// Expected leading-digit counts for a sample of `n` values
pub fn expected_distribution(n: usize) -> ExpectedDistribution {
    DigitDistribution::from_fn(|digit| benford(digit) * n as f64)
}

/// Tally leading digits
///
/// Every occurrence counts, duplicates included.
pub fn observed_distribution(digits: &[Digit]) -> ObservedDistribution {
    let mut counts = [0u64; Digit::COUNT];
    for digit in digits {
        counts[digit.index()] += 1;
    }
    DigitDistribution { values: counts }
}

/// An expected count of zero makes the chi-square term undefined
#[derive(Debug, Clone, Copy, Error)]
#[error("expected count for digit {0} is zero")]
struct DegenerateExpectation(Digit);

fn chi_square(digit: Digit, expected: f64, observed: u64) -> Result<f64, DegenerateExpectation> {
    if expected == 0.0 {
        return Err(DegenerateExpectation(digit));
    }
    Ok((observed as f64 - expected).powi(2) / expected)
}

/// Pearson's chi-square statistic over digits 1 to 9
///
/// Returns positive infinity when any expected count is zero, which only
/// happens for an empty sample.
pub fn sum_chi_squares(expected: &ExpectedDistribution, observed: &ObservedDistribution) -> f64 {
    Digit::all()
        .map(|digit| chi_square(digit, expected.get(digit), observed.get(digit)))
        .sum::<Result<f64, _>>()
        .unwrap_or_else(|e| {
            tracing::debug!("chi-square undefined ({}), using infinity", e);
            f64::INFINITY
        })
}

/// Test the observed counts against Benford's Law at every significance level
///
/// `true` means the statistic exceeds the critical value: the data deviates
/// significantly from Benford's Law at that level.
pub fn goodness_of_fit(
    expected: &ExpectedDistribution,
    observed: &ObservedDistribution,
) -> LevelMap<bool> {
    let statistic = sum_chi_squares(expected, observed);
    LevelMap::from_fn(|level| statistic > level.critical_value())
}
