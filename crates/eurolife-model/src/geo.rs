//! Feature-collection document model.
//!
//! Only the collection envelope is typed. Everything else (`bbox`, `crs`,
//! foreign members) rides along in the flattened `extra` map. A feature is
//! kept as its raw member map, so members are written back in source order
//! and a `null` or absent member stays that way.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(Map<String, Value>);

impl Feature {
    /// The `properties` object, if present and not null.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties")?.as_object()
    }

    pub fn properties_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.get_mut("properties")?.as_object_mut()
    }

    /// Returns a string property, if present and a string.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties()?.get(key)?.as_str()
    }
}
