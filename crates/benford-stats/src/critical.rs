//! Chi-square critical values for the leading-digit test
//!
//! Nine digit categories give 8 degrees of freedom. The table below is fixed
//! to that case and is not meant to be generalised to other category counts.
//! Values from the NIST/SEMATECH e-Handbook, upper critical values of the
//! chi-square distribution.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Degrees of freedom the critical values are tabulated for
pub const DEGREES_OF_FREEDOM: usize = 8;

/// Significance level of the goodness-of-fit test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignificanceLevel {
    /// p = 0.10
    P10,
    /// p = 0.05
    P05,
    /// p = 0.025
    P025,
    /// p = 0.01
    P01,
    /// p = 0.001
    P001,
}

/// Unknown significance level literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown significance level: {0:?} (expected one of 0.10, 0.05, 0.025, 0.01, 0.001)")]
pub struct UnknownLevel(pub String);

impl SignificanceLevel {
    /// All levels, loosest first
    pub const ALL: [SignificanceLevel; 5] = [
        SignificanceLevel::P10,
        SignificanceLevel::P05,
        SignificanceLevel::P025,
        SignificanceLevel::P01,
        SignificanceLevel::P001,
    ];

    /// Literal used at the interchange boundary, e.g. `"0.05"`
    pub fn as_str(&self) -> &'static str {
        match self {
            SignificanceLevel::P10 => "0.10",
            SignificanceLevel::P05 => "0.05",
            SignificanceLevel::P025 => "0.025",
            SignificanceLevel::P01 => "0.01",
            SignificanceLevel::P001 => "0.001",
        }
    }

    /// The significance level as a probability
    pub fn alpha(&self) -> f64 {
        match self {
            SignificanceLevel::P10 => 0.10,
            SignificanceLevel::P05 => 0.05,
            SignificanceLevel::P025 => 0.025,
            SignificanceLevel::P01 => 0.01,
            SignificanceLevel::P001 => 0.001,
        }
    }

    /// Upper critical value of chi-square with 8 degrees of freedom
    pub fn critical_value(&self) -> f64 {
        match self {
            SignificanceLevel::P10 => 13.362,
            SignificanceLevel::P05 => 15.507,
            SignificanceLevel::P025 => 17.535,
            SignificanceLevel::P01 => 20.090,
            SignificanceLevel::P001 => 26.125,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignificanceLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignificanceLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

impl Serialize for SignificanceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SignificanceLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// One value per significance level, iterated in table order
///
/// Serialized as an object keyed by the level literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelMap<T> {
    values: [T; 5],
}

impl<T: Copy> LevelMap<T> {
    /// Build a map by evaluating `f` for every level
    pub fn from_fn(mut f: impl FnMut(SignificanceLevel) -> T) -> Self {
        Self {
            values: SignificanceLevel::ALL.map(&mut f),
        }
    }

    /// Value for a level
    pub fn get(&self, level: SignificanceLevel) -> T {
        self.values[level.index()]
    }

    /// Iterate `(level, value)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (SignificanceLevel, T)> + '_ {
        SignificanceLevel::ALL
            .into_iter()
            .zip(self.values.iter().copied())
    }
}

/// Critical values for every significance level
pub fn critical_values() -> LevelMap<f64> {
    LevelMap::from_fn(|level| level.critical_value())
}

impl<T: Serialize> Serialize for LevelMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (level, value) in SignificanceLevel::ALL.iter().zip(self.values.iter()) {
            map.serialize_entry(level.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Copy> Deserialize<'de> for LevelMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw: HashMap<String, T> = HashMap::deserialize(deserializer)?;

        let mut values = Vec::with_capacity(SignificanceLevel::ALL.len());
        for level in SignificanceLevel::ALL {
            let value = raw
                .remove(level.as_str())
                .ok_or_else(|| D::Error::custom(format!("missing level {}", level)))?;
            values.push(value);
        }
        if let Some(extra) = raw.keys().next() {
            return Err(D::Error::custom(UnknownLevel(extra.clone())));
        }

        let values: [T; 5] = values
            .try_into()
            .map_err(|_| D::Error::custom("wrong number of levels"))?;
        Ok(Self { values })
    }
}
