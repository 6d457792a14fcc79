//! Canonical feature properties.

use eurolife_model::{Feature, FeatureCollection, GeometrySpec};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Canonical property key for the country code.
pub const COUNTRY_CODE_KEY: &str = "country_code";
/// Canonical property key for the country name.
pub const COUNTRY_NAME_KEY: &str = "country_name";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GeometryReport {
    pub features: usize,
    pub with_code: usize,
    pub with_name: usize,
}

/// Adds `country_code` and `country_name` to every feature's properties.
///
/// Each canonical key is copied from the first source key present, in the
/// priority order of the [`GeometrySpec`]. Source keys are retained and
/// features without a matching key pass through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct GeometryNormalizer<'a> {
    spec: &'a GeometrySpec,
}

impl<'a> GeometryNormalizer<'a> {
    pub fn new(spec: &'a GeometrySpec) -> Self {
        Self { spec }
    }

    pub fn normalize(&self, collection: &mut FeatureCollection) -> GeometryReport {
        let mut report = GeometryReport {
            features: collection.len(),
            ..GeometryReport::default()
        };

        for properties in collection
            .features
            .iter_mut()
            .filter_map(Feature::properties_mut)
        {
            if copy_first(properties, &self.spec.code_keys, COUNTRY_CODE_KEY) {
                report.with_code += 1;
            }
            if copy_first(properties, &self.spec.name_keys, COUNTRY_NAME_KEY) {
                report.with_name += 1;
            }
        }

        if report.with_code < report.features {
            debug!(
                without_code = report.features - report.with_code,
                "features without a country code key"
            );
        }
        info!(
            features = report.features,
            with_code = report.with_code,
            with_name = report.with_name,
            "normalized feature properties"
        );
        report
    }
}

fn copy_first(properties: &mut Map<String, Value>, sources: &[String], target: &str) -> bool {
    let Some(value) = sources.iter().find_map(|key| properties.get(key).cloned()) else {
        return false;
    };
    properties.insert(target.to_string(), value);
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn collection(value: Value) -> FeatureCollection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn copies_prioritized_keys() {
        let mut fc = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null,
                 "properties": {"CNTR_CODE": "EL", "iso_a2": "GR", "NAME_LATN": "Elláda"}},
                {"type": "Feature", "geometry": null,
                 "properties": {"iso_a2": "DE", "name": "Germany"}},
                {"type": "Feature", "geometry": null,
                 "properties": {"other": 1}},
                {"type": "Feature", "geometry": null}
            ]
        }));

        let report = GeometryNormalizer::new(&GeometrySpec::default()).normalize(&mut fc);

        assert_eq!(
            report,
            GeometryReport {
                features: 4,
                with_code: 2,
                with_name: 2
            }
        );
        let first = &fc.features[0];
        assert_eq!(first.property_str(COUNTRY_CODE_KEY), Some("EL"));
        assert_eq!(first.property_str(COUNTRY_NAME_KEY), Some("Elláda"));
        assert_eq!(first.property_str("CNTR_CODE"), Some("EL"));

        let second = &fc.features[1];
        assert_eq!(second.property_str(COUNTRY_CODE_KEY), Some("DE"));
        assert_eq!(second.property_str(COUNTRY_NAME_KEY), Some("Germany"));

        let third = &fc.features[2];
        assert!(third.property_str(COUNTRY_CODE_KEY).is_none());
        assert!(fc.features[3].properties().is_none());
    }
}
