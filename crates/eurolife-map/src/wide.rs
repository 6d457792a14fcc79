use eurolife_model::TargetYears;
use serde::{Deserialize, Serialize};

/// A column whose header is a target year, e.g. `2018`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearColumn {
    pub index: usize,
    pub name: String,
    pub year: i32,
}

/// Finds columns whose name is purely digits and names a target year.
pub fn find_year_columns<S: AsRef<str>>(names: &[S], target_years: &TargetYears) -> Vec<YearColumn> {
    names
        .iter()
        .enumerate()
        .filter_map(|(index, name)| {
            let name = name.as_ref();
            let trimmed = name.trim();
            if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
                return None;
            }
            let year = trimmed.parse::<i32>().ok()?;
            target_years.contains(year).then(|| YearColumn {
                index,
                name: name.to_string(),
                year,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_target_year_columns() {
        let names = ["geo\\time", "2012", "2013", "2018", "2019Q1", "total"];
        let found = find_year_columns(&names, &TargetYears::default());
        let years: Vec<i32> = found.iter().map(|column| column.year).collect();
        assert_eq!(years, vec![2013, 2018]);
        assert_eq!(found[0].index, 2);
    }

    #[test]
    fn ignores_signed_and_empty_names() {
        let names = ["", "+2013", "-2018"];
        assert!(find_year_columns(&names, &TargetYears::default()).is_empty());
    }
}
