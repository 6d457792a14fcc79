//! Schema description and detection results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic axis a column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    Country,
    Time,
    Value,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Time => "time",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Range of an all-numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    /// Number of non-missing cells.
    pub count: usize,
}

/// One column as seen by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub index: usize,
    pub name: String,
    /// Present when every non-missing cell is numeric and at least one exists.
    pub numeric: Option<NumericSummary>,
}

impl ColumnSchema {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            numeric: None,
        }
    }

    #[must_use]
    pub fn with_numeric(mut self, summary: NumericSummary) -> Self {
        self.numeric = Some(summary);
        self
    }
}

/// Ordered column descriptions of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    /// Schema of a table whose cells are unknown; only names participate.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            columns: names
                .iter()
                .enumerate()
                .map(|(idx, name)| ColumnSchema::new(idx, name.as_ref()))
                .collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }
}

/// How a role was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// A candidate substring matched the column name.
    Name,
    /// The column is all-numeric within the plausible year range.
    YearRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedColumn {
    pub index: usize,
    pub name: String,
    pub method: DetectionMethod,
}

/// Detection result: at most one column per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedRoles {
    pub country: Option<DetectedColumn>,
    pub time: Option<DetectedColumn>,
    pub value: Option<DetectedColumn>,
}

impl DetectedRoles {
    pub fn get(&self, role: ColumnRole) -> Option<&DetectedColumn> {
        match role {
            ColumnRole::Country => self.country.as_ref(),
            ColumnRole::Time => self.time.as_ref(),
            ColumnRole::Value => self.value.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, role: ColumnRole) -> &mut Option<DetectedColumn> {
        match role {
            ColumnRole::Country => &mut self.country,
            ColumnRole::Time => &mut self.time,
            ColumnRole::Value => &mut self.value,
        }
    }

    /// True when no time axis was found and the table may be wide.
    pub fn needs_wide_check(&self) -> bool {
        self.time.is_none()
    }

    pub fn is_assigned(&self, index: usize) -> bool {
        [&self.country, &self.time, &self.value]
            .into_iter()
            .flatten()
            .any(|column| column.index == index)
    }

    /// Roles that were not resolved.
    pub fn missing(&self) -> Vec<ColumnRole> {
        [ColumnRole::Country, ColumnRole::Time, ColumnRole::Value]
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }
}
