// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Zone identity: dense ids, measures, and the parent region each zone falls in.

use config::{EngineConfig, IdentitySettings};
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Area, MultiPolygon};
use geometry::measure::{centroid, part_count, ring_count};
use geometry::{AttributeValue, CoordinateReference, FeatureSet, Real, Record};
use log::debug;
use serde::Serialize;

pub const ZONE_ID_FIELD: &str = "zone_id";
pub const AREA_FIELD: &str = "area";
pub const PART_COUNT_FIELD: &str = "part_count";
pub const RING_COUNT_FIELD: &str = "ring_count";
pub const PARENT_REGION_FIELD: &str = "parent_region_id";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Zone {
    pub geometry: MultiPolygon<Real>,
    pub zone_id: i64,
    pub area: Real,
    /// Disjoint exterior contours.
    pub part_count: usize,
    /// Holes across all parts.
    pub ring_count: usize,
    pub parent_region_id: Option<AttributeValue>,
    /// Attributes carried over from the input, e.g. a band's distance.
    pub attributes: Record,
}

impl Zone {
    /// The carried attributes plus the identity fields.
    pub fn record(&self) -> Record {
        let mut record = self.attributes.clone();
        record.insert(ZONE_ID_FIELD.to_owned(), AttributeValue::Integer(self.zone_id));
        record.insert(AREA_FIELD.to_owned(), AttributeValue::Number(self.area));
        record.insert(
            PART_COUNT_FIELD.to_owned(),
            AttributeValue::Integer(self.part_count as i64),
        );
        record.insert(
            RING_COUNT_FIELD.to_owned(),
            AttributeValue::Integer(self.ring_count as i64),
        );
        record.insert(
            PARENT_REGION_FIELD.to_owned(),
            self.parent_region_id.clone().into(),
        );
        record
    }
}

pub struct ZoneIdentityAssigner {
    settings: IdentitySettings,
}

impl ZoneIdentityAssigner {
    pub fn new(settings: IdentitySettings) -> Self {
        Self { settings }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.identity.clone())
    }

    /// Label zones in the order given.
    pub fn assign(
        &self,
        zones: impl IntoIterator<Item = (MultiPolygon<Real>, Record)>,
        parents: Option<&FeatureSet>,
    ) -> Vec<Zone> {
        zones
            .into_iter()
            .enumerate()
            .map(|(position, (geometry, attributes))| {
                let parent_region_id = parents.and_then(|p| self.parent_of(&geometry, p));
                Zone {
                    zone_id: self.settings.first_id + position as i64,
                    area: geometry.unsigned_area(),
                    part_count: part_count(&geometry),
                    ring_count: ring_count(&geometry),
                    parent_region_id,
                    attributes,
                    geometry,
                }
            })
            .collect()
    }

    /// Label every feature of a polygon set, such as ring buffer bands.
    pub fn assign_feature_set(
        &self,
        set: FeatureSet<MultiPolygon<Real>>,
        parents: Option<&FeatureSet>,
    ) -> Vec<Zone> {
        self.assign(set.into_iter().map(|f| (f.geometry, f.attributes)), parents)
    }

    /// The parent region whose interior holds the zone's centroid.
    ///
    /// Inside exactly one parent gives that parent.  Inside none but on the
    /// boundary of some gives the lowest of their ids.  Anything else gives
    /// `None`.  Parents without an id are ignored.
    pub fn parent_of(&self, zone: &MultiPolygon<Real>, parents: &FeatureSet) -> Option<AttributeValue> {
        let center = centroid(zone)?.0;
        let field = self.settings.parent_id_field.as_str();

        let mut inside = Vec::new();
        let mut on_boundary = Vec::new();
        for parent in parents {
            let Some(id) = parent.attribute(field).filter(|id| !id.is_null()) else {
                continue;
            };
            match parent.geometry.coordinate_position(&center) {
                CoordPos::Inside => inside.push(id),
                CoordPos::OnBoundary => on_boundary.push(id),
                CoordPos::Outside => {},
            }
        }

        match inside.as_slice() {
            [only] => Some((*only).clone()),
            [] => on_boundary.into_iter().min_by(|a, b| a.compare(b)).cloned(),
            _ => {
                debug!("Centroid {:?} lies inside {} parents", center, inside.len());
                None
            },
        }
    }

    /// Zones as a polygon feature set with their identity fields in each record.
    pub fn to_feature_set(&self, zones: &[Zone], crs: CoordinateReference) -> FeatureSet<MultiPolygon<Real>> {
        let mut set = FeatureSet::new(crs);
        for zone in zones {
            set.push(zone.geometry.clone(), zone.record());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, polygon};

    fn rect(x0: Real, y0: Real, x1: Real, y1: Real) -> MultiPolygon<Real> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
        ]])
    }

    fn halves() -> FeatureSet {
        let mut parents = FeatureSet::new(CoordinateReference::default());
        for (id, x0) in [(2, 50.0), (1, 0.0)] {
            let mut record = Record::new();
            record.insert("region_id".into(), AttributeValue::Integer(id));
            parents.push(Geometry::MultiPolygon(rect(x0, 0.0, x0 + 50.0, 100.0)), record);
        }
        parents
    }

    fn assigner(first_id: i64) -> ZoneIdentityAssigner {
        let settings = IdentitySettings {
            first_id,
            ..IdentitySettings::default()
        };
        ZoneIdentityAssigner::new(settings)
    }

    #[test]
    fn ids_are_dense_from_first_id() {
        let zones = assigner(1).assign(
            vec![(rect(0.0, 0.0, 1.0, 1.0), Record::new()), (rect(1.0, 0.0, 3.0, 1.0), Record::new())],
            None,
        );
        assert_eq!(zones.iter().map(|z| z.zone_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(zones[1].area, 2.0);
        assert_eq!(zones[1].part_count, 1);
        assert_eq!(zones[1].ring_count, 0);
        assert_eq!(zones[0].parent_region_id, None);
    }

    #[test]
    fn strictly_inside_one_parent() {
        let parents = halves();
        assert_eq!(
            assigner(0).parent_of(&rect(60.0, 10.0, 70.0, 20.0), &parents),
            Some(AttributeValue::Integer(2))
        );
    }

    #[test]
    fn boundary_centroid_takes_the_lowest_id() {
        let parents = halves();
        assert_eq!(
            assigner(0).parent_of(&rect(40.0, 10.0, 60.0, 20.0), &parents),
            Some(AttributeValue::Integer(1))
        );
    }

    #[test]
    fn outside_every_parent_is_none() {
        let parents = halves();
        assert_eq!(assigner(0).parent_of(&rect(200.0, 0.0, 210.0, 10.0), &parents), None);
    }

    #[test]
    fn overlapping_parents_are_ambiguous() {
        let mut parents = halves();
        let mut record = Record::new();
        record.insert("region_id".into(), AttributeValue::Integer(9));
        parents.push(Geometry::MultiPolygon(rect(0.0, 0.0, 100.0, 100.0)), record);
        assert_eq!(assigner(0).parent_of(&rect(10.0, 10.0, 20.0, 20.0), &parents), None);
    }

    #[test]
    fn record_carries_attributes_and_identity() {
        let mut attributes = Record::new();
        attributes.insert("distance".into(), AttributeValue::Number(660.0));
        let zones = assigner(0).assign(vec![(rect(0.0, 0.0, 2.0, 2.0), attributes)], Some(&halves()));
        let record = zones[0].record();
        assert_eq!(record.get("distance"), Some(&AttributeValue::Number(660.0)));
        assert_eq!(record.get(ZONE_ID_FIELD), Some(&AttributeValue::Integer(0)));
        assert_eq!(record.get(PARENT_REGION_FIELD), Some(&AttributeValue::Integer(1)));
    }
}

// End of File
