// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Property-based tests for band and zone invariants using the `proptest` crate.

use proptest::prelude::*;

use geo::{Area, Geometry, LineString, Point, polygon};
use zonation::geometry::overlay::intersection_area;
use zonation::geometry::{BufferOptions, buffer};
use zonation::prelude::*;
use zonation::{IdentitySettings, MicrozoneSettings};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Between one and four buffer distances, in metres.
fn arb_distances() -> impl Strategy<Value = Vec<Real>> {
    prop::collection::vec(10.0f64..800.0, 1..5)
}

/// Distinct x positions of north-south roads across the 100 x 100 square.
fn arb_road_positions() -> impl Strategy<Value = Vec<Real>> {
    prop::collection::btree_set(1u32..100, 0..8)
        .prop_map(|xs| xs.into_iter().map(Real::from).collect())
}

fn point_set() -> FeatureSet {
    let mut set = FeatureSet::new(CoordinateReference::default());
    set.push(Geometry::Point(Point::new(0.0, 0.0)), Record::new());
    set
}

fn square_boundary() -> FeatureSet {
    let mut set = FeatureSet::new(CoordinateReference::default());
    set.push(
        Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 100.0, y: 0.0),
            (x: 100.0, y: 100.0),
            (x: 0.0, y: 100.0),
        ]),
        Record::new(),
    );
    set
}

fn roads_at(xs: &[Real]) -> FeatureSet {
    let mut set = FeatureSet::new(CoordinateReference::default());
    for &x in xs {
        set.push(
            Geometry::LineString(LineString::from(vec![(x, -10.0), (x, 110.0)])),
            Record::new(),
        );
    }
    set
}

fn microzones(xs: &[Real], threshold: Real) -> Vec<Zone> {
    let settings = MicrozoneSettings {
        thresholds: vec![threshold],
        ..MicrozoneSettings::default()
    };
    MicrozoneBuilder::new(Tolerance::default(), settings, IdentitySettings::default())
        .build(&roads_at(xs), &square_boundary(), None)
        .unwrap()
        .zones
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// 1. Bands tile the outermost buffer without overlapping
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn bands_tile_the_largest_buffer(distances in arb_distances()) {
        let bands = RingBufferBuilder::from_config(&EngineConfig::default())
            .build(&point_set(), &distances)
            .unwrap();
        prop_assert_eq!(bands.len(), distances.len());

        let largest = distances.iter().copied().fold(0.0, Real::max);
        let outer = buffer(
            &point_set().features[0].geometry,
            largest,
            &BufferOptions::default(),
            &Tolerance::default(),
        )
        .unwrap()
        .unsigned_area();
        let total: Real = bands.iter().map(|b| b.geometry.unsigned_area()).sum();
        prop_assert!((total - outer).abs() / outer < 1e-4,
            "bands cover {} but the largest buffer is {}", total, outer);

        for (i, a) in bands.iter().enumerate() {
            for b in &bands[i + 1..] {
                prop_assert!(intersection_area(&a.geometry, &b.geometry) < 1e-3 * outer);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Preliminary zones partition the boundary
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn roads_cut_one_zone_per_strip(xs in arb_road_positions()) {
        let zones = microzones(&xs, 0.5);
        prop_assert_eq!(zones.len(), xs.len() + 1);

        let total: Real = zones.iter().map(|z| z.area).sum();
        prop_assert!((total - 10_000.0).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 3. Elimination leaves no zone under the threshold and keeps the area
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn no_zone_is_left_undersized(xs in arb_road_positions()) {
        let zones = microzones(&xs, 1000.0);
        prop_assert!(!zones.is_empty());
        for zone in &zones {
            prop_assert!(zone.area >= 1000.0, "zone {} has area {}", zone.zone_id, zone.area);
        }

        let total: Real = zones.iter().map(|z| z.area).sum();
        prop_assert!((total - 10_000.0).abs() < TOL);

        let ids: Vec<i64> = zones.iter().map(|z| z.zone_id).collect();
        let dense: Vec<i64> = (0..zones.len() as i64).collect();
        prop_assert_eq!(ids, dense);
    }
}

// End of File
