// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use geo::{Area, Geometry, LineString, Point};
use zonation::geometry::overlay::{dissolve_union, intersection_area};
use zonation::geometry::{BufferOptions, buffer};
use zonation::identity::PARENT_REGION_FIELD;
use zonation::prelude::*;
use zonation::RingBufferOptions;

fn transit_stop() -> FeatureSet {
    let mut set = FeatureSet::new(CoordinateReference::default());
    set.push(Geometry::Point(Point::new(1000.0, 2000.0)), Record::new());
    set
}

fn builder() -> RingBufferBuilder {
    logging::try_init();
    RingBufferBuilder::from_config(&EngineConfig::default())
}

fn raw_area(features: &FeatureSet, distance: Real) -> Real {
    let geometry = &features.features[0].geometry;
    buffer(geometry, distance, &BufferOptions::default(), &Tolerance::default())
        .unwrap()
        .unsigned_area()
}

fn close(a: Real, b: Real) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn bands_are_ordered_outermost_first() {
    let stop = transit_stop();
    let bands = builder().build(&stop, &[660.0, 1320.0, 330.0]).unwrap();

    let distances: Vec<Real> = bands.iter().map(|b| b.distance).collect();
    assert_eq!(distances, vec![1320.0, 660.0, 330.0]);

    let outer = raw_area(&stop, 1320.0) - raw_area(&stop, 660.0);
    let middle = raw_area(&stop, 660.0) - raw_area(&stop, 330.0);
    let inner = raw_area(&stop, 330.0);
    assert!(close(bands[0].geometry.unsigned_area(), outer));
    assert!(close(bands[1].geometry.unsigned_area(), middle));
    assert!(close(bands[2].geometry.unsigned_area(), inner));
}

#[test]
fn bands_do_not_overlap() {
    let mut corridor = FeatureSet::new(CoordinateReference::default());
    corridor.push(
        Geometry::LineString(LineString::from(vec![(0.0, 0.0), (500.0, 0.0), (500.0, 400.0)])),
        Record::new(),
    );
    corridor.push(Geometry::Point(Point::new(-200.0, 100.0)), Record::new());

    let bands = builder().build(&corridor, &[100.0, 250.0, 50.0]).unwrap();
    for (i, a) in bands.iter().enumerate() {
        for b in &bands[i + 1..] {
            assert!(intersection_area(&a.geometry, &b.geometry) < 1e-3);
        }
    }

    // Together the bands cover the dissolved outermost buffer.
    let buffers: Vec<_> = corridor
        .geometries()
        .map(|g| buffer(g, 250.0, &BufferOptions::default(), &Tolerance::default()).unwrap())
        .collect();
    let outer = dissolve_union(&buffers, &Tolerance::default()).unsigned_area();
    let total: Real = bands.iter().map(|b| b.geometry.unsigned_area()).sum();
    assert!(
        (total - outer).abs() / outer < 1e-4,
        "bands cover {total} but the corridor buffer is {outer}"
    );
}

#[test]
fn repeated_distance_gives_an_empty_band() {
    let bands = builder().build(&transit_stop(), &[500.0, 500.0]).unwrap();
    assert_eq!(bands.len(), 2);
    assert!(bands[0].geometry.unsigned_area() < 1e-6);
    assert!(close(
        bands[1].geometry.unsigned_area(),
        raw_area(&transit_stop(), 500.0)
    ));
}

#[test]
fn bands_carry_their_distance_and_identity() {
    let options = RingBufferOptions {
        field_name: "ring".to_owned(),
        ..RingBufferOptions::default()
    };
    let builder = RingBufferBuilder::new(Tolerance::default(), BufferOptions::default(), options);
    let set = builder.build_feature_set(&transit_stop(), &[200.0, 100.0]).unwrap();

    let zones = ZoneIdentityAssigner::new(Default::default()).assign_feature_set(set, None);
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].attributes.get("ring"), Some(&AttributeValue::Number(200.0)));
    assert_eq!(zones[1].attributes.get("ring"), Some(&AttributeValue::Number(100.0)));
    // The outer band is an annulus.
    assert_eq!(zones[0].ring_count, 1);
    assert_eq!(zones[1].ring_count, 0);
    assert_eq!(zones[0].record().get(PARENT_REGION_FIELD), Some(&AttributeValue::Null));
}

#[test]
fn distances_are_converted_into_the_crs_unit() {
    let crs = CoordinateReference::new(Some(2236), LinearUnit::Feet);
    let mut stop = FeatureSet::new(crs.clone());
    stop.push(Geometry::Point(Point::new(0.0, 0.0)), Record::new());

    // Distances default to metres; coordinates are in feet.
    let set = builder().build_feature_set(&stop, &[100.0]).unwrap();
    assert_eq!(set.crs, crs);
    let radius_ft = 100.0 / 0.3048;
    let expected = std::f64::consts::PI * radius_ft * radius_ft;
    let band = &set.features[0];
    assert!((band.geometry.unsigned_area() - expected).abs() / expected < 0.01);
    assert_eq!(band.attribute("distance"), Some(&AttributeValue::Number(100.0)));
}

#[test]
fn labelled_bands_become_a_feature_set() {
    let bands = builder().build(&transit_stop(), &[300.0, 150.0]).unwrap();
    let crs = transit_stop().crs;
    let assigner = ZoneIdentityAssigner::from_config(&EngineConfig::default());
    let zones = assigner.assign(
        bands.into_iter().map(|band| {
            let mut record = Record::new();
            record.insert("distance".into(), AttributeValue::Number(band.distance));
            (band.geometry, record)
        }),
        None,
    );
    let set = assigner.to_feature_set(&zones, crs);
    assert_eq!(set.len(), 2);
    assert_eq!(set.features[1].attribute("zone_id"), Some(&AttributeValue::Integer(1)));
    assert_eq!(set.features[1].attribute("distance"), Some(&AttributeValue::Number(150.0)));
}

#[test]
fn invalid_coordinates_are_rejected() {
    let mut set = FeatureSet::new(CoordinateReference::default());
    set.push(
        Geometry::LineString(LineString::from(vec![(0.0, 0.0), (Real::NAN, 1.0)])),
        Record::new(),
    );
    assert!(matches!(
        builder().build(&set, &[10.0]),
        Err(ZonationError::InvalidGeometry(_))
    ));
}

// End of File
