use serde::{Deserialize, Serialize};

use crate::types::ColumnRole;

/// Substrings that identify the country axis (`geo\time` is the Eurostat
/// wide-table header).
pub const COUNTRY_CANDIDATES: &[&str] = &["geo", "country", "geo\\time"];

/// Substrings that identify the time axis.
pub const TIME_CANDIDATES: &[&str] = &["time", "year"];

/// Ordered `(role, candidate substrings)` pairs.
///
/// Order matters twice: a column takes the first role whose candidates match
/// its name, and within a role the candidate order is the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePatterns {
    entries: Vec<(ColumnRole, Vec<String>)>,
}

impl RolePatterns {
    pub fn new(entries: Vec<(ColumnRole, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(role, candidates)| {
                let lowered = candidates
                    .iter()
                    .map(|candidate| candidate.trim().to_lowercase())
                    .filter(|candidate| !candidate.is_empty())
                    .collect();
                (role, lowered)
            })
            .collect();
        Self { entries }
    }

    /// Standard country and time candidates followed by dataset-specific
    /// value candidates.
    pub fn with_value_candidates<S: AsRef<str>>(values: &[S]) -> Self {
        Self::new(vec![
            (ColumnRole::Country, owned(COUNTRY_CANDIDATES)),
            (ColumnRole::Time, owned(TIME_CANDIDATES)),
            (
                ColumnRole::Value,
                values.iter().map(|v| v.as_ref().to_string()).collect(),
            ),
        ])
    }

    /// First role whose candidates occur (case-insensitively) in `column`.
    pub fn classify(&self, column: &str) -> Option<ColumnRole> {
        let lowered = column.to_lowercase();
        self.entries
            .iter()
            .find(|(_, candidates)| {
                candidates
                    .iter()
                    .any(|candidate| lowered.contains(candidate.as_str()))
            })
            .map(|(role, _)| *role)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> RolePatterns {
        RolePatterns::with_value_candidates(&["values", "satisfaction"])
    }

    #[test]
    fn classify_is_case_insensitive() {
        let patterns = patterns();
        assert_eq!(patterns.classify("GEO"), Some(ColumnRole::Country));
        assert_eq!(patterns.classify("TIME_PERIOD"), Some(ColumnRole::Time));
        assert_eq!(patterns.classify("Life_Satisfaction"), Some(ColumnRole::Value));
        assert_eq!(patterns.classify("unit"), None);
    }

    #[test]
    fn earlier_role_wins_for_ambiguous_names() {
        // Matches both the country and time candidates.
        assert_eq!(patterns().classify("geo\\time"), Some(ColumnRole::Country));
    }

    #[test]
    fn blank_candidates_are_dropped() {
        let patterns = RolePatterns::new(vec![(ColumnRole::Value, vec!["  ".to_string()])]);
        assert_eq!(patterns.classify("anything"), None);
    }
}
