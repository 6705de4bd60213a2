// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Ring repair: remove holes that polygonization and elimination leave
//! behind in zones.
//!
//! A hole that another zone sits in is a real feature of the subdivision, and
//! so is a hole of the boundary itself; any other hole is a defect and is
//! filled.

use config::EnclosedZonePolicy;
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Coord, MultiPolygon, Polygon};
use geometry::measure::{boundary_contour_count, interior_point};
use geometry::Real;
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Repair {
    /// Zones whose occupied holes were left in place (or which absorbed the
    /// zones inside them).
    pub(crate) set_aside: usize,
    /// Zones erased because another zone absorbed them.
    pub(crate) erased: usize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Hole {
    /// Another zone lies in the hole.
    occupied: bool,
    /// The hole is outside the boundary region.
    outside: bool,
}

fn probes(zones: &[MultiPolygon<Real>]) -> Vec<Vec<Coord<Real>>> {
    zones
        .iter()
        .map(|zone| {
            zone.0
                .iter()
                .filter_map(|part| interior_point(&MultiPolygon(vec![part.clone()])))
                .map(|p| p.0)
                .collect()
        })
        .collect()
}

fn inside(ring: &Polygon<Real>, probe: Coord<Real>) -> bool {
    ring.coordinate_position(&probe) == CoordPos::Inside
}

/// Per hole of `zone`, in part order then hole order.
fn classify_holes(
    zone: usize,
    zones: &[MultiPolygon<Real>],
    probes: &[Vec<Coord<Real>>],
    region: &MultiPolygon<Real>,
) -> Vec<Vec<Hole>> {
    zones[zone]
        .0
        .iter()
        .map(|part| {
            part.interiors()
                .iter()
                .map(|hole| {
                    let hole = Polygon::new(hole.clone(), Vec::new());
                    let occupied = probes
                        .iter()
                        .enumerate()
                        .filter(|&(other, _)| other != zone)
                        .any(|(_, points)| points.iter().any(|&p| inside(&hole, p)));
                    let outside = interior_point(&MultiPolygon(vec![hole]))
                        .is_some_and(|p| region.coordinate_position(&p.0) != CoordPos::Inside);
                    Hole { occupied, outside }
                })
                .collect()
        })
        .collect()
}

fn keep_holes(zone: &MultiPolygon<Real>, holes: &[Vec<Hole>], keep: impl Fn(Hole) -> bool) -> MultiPolygon<Real> {
    let parts = zone
        .0
        .iter()
        .zip(holes)
        .map(|(part, kinds)| {
            let interiors = part
                .interiors()
                .iter()
                .zip(kinds)
                .filter(|&(_, &kind)| keep(kind))
                .map(|(hole, _)| hole.clone())
                .collect();
            Polygon::new(part.exterior().clone(), interiors)
        })
        .collect();
    MultiPolygon(parts)
}

/// One repair pass over zones cut from `region`.
pub(crate) fn repair_rings(
    zones: Vec<MultiPolygon<Real>>,
    region: &MultiPolygon<Real>,
    policy: EnclosedZonePolicy,
) -> (Vec<MultiPolygon<Real>>, Repair) {
    let probes = probes(&zones);
    let holes: Vec<Vec<Vec<Hole>>> = (0..zones.len())
        .map(|i| {
            if boundary_contour_count(&zones[i]) > 1 {
                classify_holes(i, &zones, &probes, region)
            } else {
                vec![Vec::new(); zones[i].0.len()]
            }
        })
        .collect();
    let encloses = |i: usize| holes[i].iter().flatten().any(|h| h.occupied);

    let mut repair = Repair::default();
    let repaired: Vec<MultiPolygon<Real>> = match policy {
        EnclosedZonePolicy::PreserveEnclosed => {
            repair.set_aside = (0..zones.len()).filter(|&i| encloses(i)).count();
            zones
                .iter()
                .zip(&holes)
                .map(|(zone, kinds)| keep_holes(zone, kinds, |h| h.occupied || h.outside))
                .collect()
        },
        EnclosedZonePolicy::Absorb => {
            let filled: Vec<MultiPolygon<Real>> = zones
                .iter()
                .zip(&holes)
                .map(|(zone, kinds)| keep_holes(zone, kinds, |h| h.outside))
                .collect();
            let absorbers: Vec<usize> = (0..zones.len()).filter(|&i| encloses(i)).collect();
            repair.set_aside = absorbers.len();

            let erased: Vec<bool> = (0..zones.len())
                .map(|j| {
                    absorbers.iter().any(|&i| {
                        i != j
                            && probes[j]
                                .iter()
                                .any(|&p| filled[i].0.iter().any(|part| inside(part, p)))
                    })
                })
                .collect();
            repair.erased = erased.iter().filter(|&&e| e).count();

            filled
                .into_iter()
                .zip(erased)
                .filter(|(_, e)| !e)
                .map(|(zone, _)| zone)
                .collect()
        },
    };

    debug!(
        "Ring repair: {} zones set aside, {} erased",
        repair.set_aside, repair.erased
    );
    (repaired, repair)
}


// End of File
