pub mod country;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod options;
pub mod years;

pub use country::{CountryAliases, CountryCode};
pub use dataset::{CanonicalDataset, CanonicalRecord, ValueDomain};
pub use error::{ModelError, Result};
pub use geo::{Feature, FeatureCollection};
pub use options::{
    ConsistencyThresholds, DatasetSpec, GeometrySpec, NormalizationOptions, PipelineConfig,
};
pub use years::{TargetYears, YearRange};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_covers_both_datasets() {
        let config = PipelineConfig::default();
        let names: Vec<&str> = config
            .datasets
            .iter()
            .map(|spec| spec.value_name.as_str())
            .collect();
        assert_eq!(names, vec!["life_satisfaction", "median_income"]);
        assert_eq!(config.normalization.max_extra_columns, 3);
        assert_eq!(config.consistency.min_common_countries, 20);
        assert_eq!(config.consistency.min_common_years, 3);
    }

    #[test]
    fn config_serializes() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).expect("serialize config");
        let round: PipelineConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(round.datasets.len(), 2);
        assert_eq!(
            round.normalization.target_years,
            config.normalization.target_years
        );
    }
}
