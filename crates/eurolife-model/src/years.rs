use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The set of years the pipeline keeps.
///
/// Consulted both when looking for year-labeled columns in wide tables and
/// when filtering long-form rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetYears(BTreeSet<i32>);

impl TargetYears {
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        Self(years.into_iter().collect())
    }

    pub fn contains(&self, year: i32) -> bool {
        self.0.contains(&year)
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TargetYears {
    fn default() -> Self {
        Self::new([2013, 2018, 2021, 2022, 2023])
    }
}

/// Plausible calendar-year bounds used to recognise an unnamed time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= f64::from(self.min) && value <= f64::from(self.max)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 2000,
            max: 2030,
        }
    }
}
