//! Two-level median imputation.

use std::collections::BTreeMap;

/// Median of `values`, or `None` when empty.
///
/// Sorts in place. Even-length inputs average the two middle values.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len().is_multiple_of(2) {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// How many cells each imputation level filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImputationOutcome {
    pub by_group: usize,
    pub by_dataset: usize,
}

impl ImputationOutcome {
    pub fn total(&self) -> usize {
        self.by_group + self.by_dataset
    }
}

/// Fills missing values with their group's median, then the overall median.
///
/// Both medians are computed from the values present on entry, so the order
/// in which cells are filled never influences the result. Returns `None`,
/// leaving `values` untouched, when no value is present at all.
pub fn impute_group_medians<K: Ord>(keys: &[K], values: &mut [Option<f64>]) -> Option<ImputationOutcome> {
    let mut observed: Vec<f64> = values.iter().flatten().copied().collect();
    let overall = median(&mut observed)?;

    let mut groups: BTreeMap<&K, Vec<f64>> = BTreeMap::new();
    for (key, value) in keys.iter().zip(values.iter()) {
        if let Some(value) = value {
            groups.entry(key).or_default().push(*value);
        }
    }
    let group_medians: BTreeMap<&K, f64> = groups
        .into_iter()
        .filter_map(|(key, mut group)| median(&mut group).map(|m| (key, m)))
        .collect();

    let mut outcome = ImputationOutcome::default();
    for (key, value) in keys.iter().zip(values.iter_mut()) {
        if value.is_some() {
            continue;
        }
        match group_medians.get(key) {
            Some(group_median) => {
                *value = Some(*group_median);
                outcome.by_group += 1;
            }
            None => {
                *value = Some(overall);
                outcome.by_dataset += 1;
            }
        }
    }
    Some(outcome)
}
