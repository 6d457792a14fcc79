//! Canonical, analysis-ready datasets keyed by `(country, year)`.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::country::CountryCode;

/// Valid value domain of a measurement.
///
/// Values outside the domain are removed, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDomain {
    /// `min <= v <= max`.
    Closed { min: f64, max: f64 },
    /// `v > 0`.
    Positive,
}

impl ValueDomain {
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Self::Closed { min, max } => value >= min && value <= max,
            Self::Positive => value > 0.0,
        }
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed { min, max } => write!(f, "{min} <= v <= {max}"),
            Self::Positive => f.write_str("v > 0"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub country: CountryCode,
    pub year: i32,
    pub value: f64,
    /// Passthrough values, aligned with [`CanonicalDataset::extra_columns`].
    pub extras: Vec<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalDataset {
    /// Human-readable source name (e.g. "Life Satisfaction").
    pub source_name: String,
    /// Semantic name of the value column (e.g. `life_satisfaction`).
    pub value_name: String,
    pub extra_columns: Vec<String>,
    pub records: Vec<CanonicalRecord>,
}

impl CanonicalDataset {
    pub fn new(source_name: impl Into<String>, value_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            value_name: value_name.into(),
            extra_columns: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Output header: `country, year, <value_name>, extras...`.
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![
            "country".to_string(),
            "year".to_string(),
            self.value_name.clone(),
        ];
        header.extend(self.extra_columns.iter().cloned());
        header
    }

    pub fn countries(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.country.as_str().to_string())
            .collect()
    }

    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|record| record.year).collect()
    }

    /// Minimum and maximum value, or `None` for an empty dataset.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.records.iter().map(|record| record.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32, value: f64) -> CanonicalRecord {
        CanonicalRecord {
            country: CountryCode::new(country).unwrap(),
            year,
            value,
            extras: Vec::new(),
        }
    }

    #[test]
    fn closed_domain_is_inclusive() {
        let domain = ValueDomain::Closed {
            min: 0.0,
            max: 10.0,
        };
        assert!(domain.contains(0.0));
        assert!(domain.contains(10.0));
        assert!(!domain.contains(10.01));
        assert!(!domain.contains(-0.5));
    }

    #[test]
    fn positive_domain_excludes_zero() {
        assert!(!ValueDomain::Positive.contains(0.0));
        assert!(ValueDomain::Positive.contains(0.01));
    }

    #[test]
    fn dataset_coverage_and_range() {
        let mut dataset = CanonicalDataset::new("Life Satisfaction", "life_satisfaction");
        dataset.records.push(record("DE", 2013, 7.2));
        dataset.records.push(record("DE", 2018, 7.5));
        dataset.records.push(record("GR", 2013, 6.1));

        assert_eq!(dataset.countries().len(), 2);
        assert_eq!(dataset.years().into_iter().collect::<Vec<_>>(), vec![2013, 2018]);
        assert_eq!(dataset.value_range(), Some((6.1, 7.5)));
        assert_eq!(
            dataset.header(),
            vec!["country", "year", "life_satisfaction"]
        );
    }

    #[test]
    fn empty_dataset_has_no_range() {
        let dataset = CanonicalDataset::new("Income", "median_income");
        assert!(dataset.value_range().is_none());
        assert!(dataset.is_empty());
    }
}
