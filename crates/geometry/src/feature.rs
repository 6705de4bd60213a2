// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Feature sets: geometries paired with attribute records, sharing one
//! coordinate reference.

use crate::filter::FeatureFilter;
use crate::float_types::Real;
use geo::Geometry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single attribute value.  Untagged so records read naturally in TOML/JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Integer(i64),
    Number(Real),
    Text(String),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<Real> {
        match self {
            AttributeValue::Integer(i) => Some(*i as Real),
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Value equality the way an attribute query sees it: integers and floats
    /// compare numerically, `Null` never matches anything.
    pub fn matches(&self, other: &AttributeValue) -> bool {
        match (self, other) {
            (AttributeValue::Text(a), AttributeValue::Text(b)) => a == b,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Total order used for deterministic tie-breaks: `Null` first, then
    /// numbers, then text.
    pub fn compare(&self, other: &AttributeValue) -> Ordering {
        fn rank(v: &AttributeValue) -> u8 {
            match v {
                AttributeValue::Null => 0,
                AttributeValue::Integer(_) | AttributeValue::Number(_) => 1,
                AttributeValue::Text(_) => 2,
            }
        }
        match (self, other) {
            (AttributeValue::Text(a), AttributeValue::Text(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => rank(self).cmp(&rank(other)),
            },
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<Real> for AttributeValue {
    fn from(value: Real) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}

/// Attribute record with unique keys, iterated in key order.
pub type Record = BTreeMap<String, AttributeValue>;

#[derive(Clone, Debug, PartialEq)]
pub struct Feature<G = Geometry<Real>> {
    pub geometry: G,
    pub attributes: Record,
}

impl<G> Feature<G> {
    pub fn new(geometry: G, attributes: Record) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.to_owned(), value.into());
        self
    }
}

/// Linear unit of coordinates or of caller-supplied distances.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    #[default]
    Meters,
    Kilometers,
    Feet,
    Miles,
}

impl LinearUnit {
    pub const fn meters_per_unit(self) -> Real {
        match self {
            LinearUnit::Meters => 1.0,
            LinearUnit::Kilometers => 1000.0,
            LinearUnit::Feet => 0.3048,
            LinearUnit::Miles => 1609.344,
        }
    }

    /// Express `value` (in `self`) in `target` units.
    pub fn convert(self, value: Real, target: LinearUnit) -> Real {
        if self == target {
            value
        } else {
            value * self.meters_per_unit() / target.meters_per_unit()
        }
    }
}

/// Coordinate reference shared by all features of a set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateReference {
    pub epsg: Option<u32>,
    pub unit: LinearUnit,
}

impl CoordinateReference {
    pub const fn new(epsg: Option<u32>, unit: LinearUnit) -> Self {
        Self { epsg, unit }
    }
}

/// An ordered sequence of features sharing one coordinate reference.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureSet<G = Geometry<Real>> {
    pub crs: CoordinateReference,
    pub features: Vec<Feature<G>>,
}

impl<G> FeatureSet<G> {
    pub fn new(crs: CoordinateReference) -> Self {
        Self {
            crs,
            features: Vec::new(),
        }
    }

    pub fn with_features(crs: CoordinateReference, features: Vec<Feature<G>>) -> Self {
        Self { crs, features }
    }

    pub fn push(&mut self, geometry: G, attributes: Record) {
        self.features.push(Feature::new(geometry, attributes));
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature<G>> {
        self.features.iter()
    }

    pub fn geometries(&self) -> impl Iterator<Item = &G> {
        self.features.iter().map(|f| &f.geometry)
    }

    /// Features whose record the filter accepts, in input order.
    pub fn select<'a, F: FeatureFilter + ?Sized>(
        &'a self,
        filter: &'a F,
    ) -> impl Iterator<Item = &'a Feature<G>> + 'a {
        self.features.iter().filter(move |f| filter.accepts(&f.attributes))
    }

}

impl<G> IntoIterator for FeatureSet<G> {
    type Item = Feature<G>;
    type IntoIter = std::vec::IntoIter<Feature<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a, G> IntoIterator for &'a FeatureSet<G> {
    type Item = &'a Feature<G>;
    type IntoIter = std::slice::Iter<'a, Feature<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_match_across_representations() {
        assert!(AttributeValue::Integer(49035).matches(&AttributeValue::Number(49035.0)));
        assert!(!AttributeValue::Null.matches(&AttributeValue::Null));
        assert!(!AttributeValue::from("1").matches(&AttributeValue::Integer(1)));
    }

    #[test]
    fn compare_orders_null_numbers_text() {
        let mut values = vec![
            AttributeValue::from("b"),
            AttributeValue::Integer(3),
            AttributeValue::Null,
            AttributeValue::Number(1.5),
            AttributeValue::from("a"),
        ];
        values.sort_by(|a, b| a.compare(b));
        assert_eq!(
            values,
            vec![
                AttributeValue::Null,
                AttributeValue::Number(1.5),
                AttributeValue::Integer(3),
                AttributeValue::from("a"),
                AttributeValue::from("b"),
            ]
        );
    }

    #[test]
    fn feet_convert_to_meters() {
        let meters = LinearUnit::Feet.convert(1320.0, LinearUnit::Meters);
        assert!((meters - 402.336).abs() < 1e-9);
        assert_eq!(LinearUnit::Miles.convert(2.0, LinearUnit::Miles), 2.0);
    }
}

// End of File
