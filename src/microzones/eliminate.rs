// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Small-zone elimination.
//!
//! A sweep selects every zone below the threshold and merges each into the
//! unselected neighbour it shares the most boundary with.  Zones surrounded
//! only by other selected zones wait for a later sweep, by which time a
//! neighbour may have grown past the threshold.

use crate::error::{Result, ZonationError};
use geo::{Area, MultiPolygon};
use geometry::measure::shared_boundary_length;
use geometry::overlay::dissolve_union;
use geometry::{Real, Tolerance};
use log::debug;
use petgraph::graphmap::UnGraphMap;
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Elimination {
    pub(crate) merges: usize,
    pub(crate) sweeps: usize,
}

/// Which zone absorbs which, for one sweep: `(absorbed, target)` pairs in
/// ascending order of the absorbed zone.
fn plan_sweep(zones: &[MultiPolygon<Real>], threshold: Real, tol: &Tolerance) -> Vec<(usize, usize)> {
    let areas: Vec<Real> = zones.iter().map(|z| z.unsigned_area()).collect();
    let (small, large): (Vec<usize>, Vec<usize>) = (0..zones.len()).partition(|&i| areas[i] < threshold);
    if small.is_empty() || large.is_empty() {
        return Vec::new();
    }

    // Only edges between a small and a large zone can ever carry a merge.
    let mut adjacency: UnGraphMap<usize, Real> = UnGraphMap::new();
    for &i in &small {
        adjacency.add_node(i);
        for &j in &large {
            let shared = shared_boundary_length(&zones[i], &zones[j], tol);
            if !tol.is_zero_length(shared) {
                adjacency.add_edge(i, j, shared);
            }
        }
    }

    small
        .iter()
        .filter_map(|&i| {
            adjacency
                .edges(i)
                .map(|(_, j, &shared)| (shared, areas[j], j))
                .max_by(|a, b| prefer(*a, *b))
                .map(|(_, _, j)| (i, j))
        })
        .collect()
}

/// Merge-target preference over `(shared length, area, index)`: the longer
/// shared boundary, then the larger zone, then the lower index compares
/// greater.
fn prefer(a: (Real, Real, usize), b: (Real, Real, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)).then(b.2.cmp(&a.2))
}

/// Apply a sweep's merges.  Targets keep their position; absorbed zones are
/// removed.
fn apply_sweep(zones: Vec<MultiPolygon<Real>>, plan: &[(usize, usize)], tol: &Tolerance) -> Vec<MultiPolygon<Real>> {
    let mut absorbed_into: Vec<Option<usize>> = vec![None; zones.len()];
    for &(absorbed, target) in plan {
        absorbed_into[absorbed] = Some(target);
    }

    let mut groups: Vec<Vec<usize>> = (0..zones.len()).map(|i| vec![i]).collect();
    for &(absorbed, target) in plan {
        groups[target].push(absorbed);
    }

    (0..zones.len())
        .filter(|&i| absorbed_into[i].is_none())
        .map(|i| match groups[i].as_slice() {
            [only] => zones[*only].clone(),
            members => {
                let parts: Vec<MultiPolygon<Real>> = members.iter().map(|&m| zones[m].clone()).collect();
                dissolve_union(&parts, tol)
            },
        })
        .collect()
}

/// Run sweeps for one threshold until nothing changes.
///
/// A sweep that merges anything removes at least one zone, so there are never
/// more sweeps than starting zones.  With `max_sweeps` set, fails with
/// [`ZonationError::Convergence`] once that many sweeps have run and another
/// merge is still possible.
pub(crate) fn eliminate(
    zones: &mut Vec<MultiPolygon<Real>>,
    threshold: Real,
    max_sweeps: Option<usize>,
    tol: &Tolerance,
) -> Result<Elimination> {
    let mut outcome = Elimination::default();
    loop {
        let plan = plan_sweep(zones, threshold, tol);
        if plan.is_empty() {
            return Ok(outcome);
        }
        if let Some(limit) = max_sweeps.filter(|&limit| outcome.sweeps >= limit) {
            return Err(ZonationError::Convergence {
                threshold,
                sweeps: limit,
            });
        }

        debug!(
            "Sweep {} below {}: merging {} zones",
            outcome.sweeps + 1,
            threshold,
            plan.len()
        );
        *zones = apply_sweep(std::mem::take(zones), &plan, tol);
        outcome.merges += plan.len();
        outcome.sweeps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn rect(x0: Real, y0: Real, x1: Real, y1: Real) -> MultiPolygon<Real> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
        ]])
    }

    #[test]
    fn sliver_joins_the_neighbour_with_the_longest_shared_edge() {
        let tol = Tolerance::default();
        // A: left half, B: right half above the strip, C: thin strip under B.
        let mut zones = vec![
            rect(0.0, 0.0, 50.0, 100.0),
            rect(50.0, 2.0, 100.0, 100.0),
            rect(50.0, 0.0, 100.0, 2.0),
        ];
        let outcome = eliminate(&mut zones, 500.0, None, &tol).unwrap();
        assert_eq!(outcome, Elimination { merges: 1, sweeps: 1 });
        assert_eq!(zones.len(), 2);
        assert!((zones[1].unsigned_area() - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn zones_without_large_neighbours_wait_a_sweep() {
        let tol = Tolerance::default();
        let mut zones = vec![
            rect(0.0, 0.0, 96.0, 100.0),
            rect(96.0, 0.0, 98.0, 100.0),
            rect(98.0, 0.0, 100.0, 100.0),
        ];
        let outcome = eliminate(&mut zones, 1000.0, None, &tol).unwrap();
        assert_eq!(outcome, Elimination { merges: 2, sweeps: 2 });
        assert_eq!(zones.len(), 1);
        assert!((zones[0].unsigned_area() - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn sweep_limit_reports_non_convergence() {
        let tol = Tolerance::default();
        let mut zones = vec![
            rect(0.0, 0.0, 96.0, 100.0),
            rect(96.0, 0.0, 98.0, 100.0),
            rect(98.0, 0.0, 100.0, 100.0),
        ];
        assert_eq!(
            eliminate(&mut zones, 1000.0, Some(1), &tol),
            Err(ZonationError::Convergence {
                threshold: 1000.0,
                sweeps: 1
            })
        );
    }

    #[test]
    fn long_chains_drain_one_zone_per_sweep() {
        let tol = Tolerance::default();
        let mut zones = vec![rect(0.0, 0.0, 100.0, 100.0)];
        zones.extend((0..80).map(|i| {
            let x = 100.0 + i as Real;
            rect(x, 0.0, x + 1.0, 100.0)
        }));
        let outcome = eliminate(&mut zones, 1000.0, None, &tol).unwrap();
        assert_eq!(outcome, Elimination { merges: 80, sweeps: 80 });
        assert_eq!(zones.len(), 1);
        assert!((zones[0].unsigned_area() - 18_000.0).abs() < 1e-6);
    }

    #[test]
    fn isolated_small_zones_are_kept() {
        let tol = Tolerance::default();
        let mut zones = vec![rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 0.0, 30.0, 10.0)];
        let outcome = eliminate(&mut zones, 1000.0, None, &tol).unwrap();
        assert_eq!(outcome, Elimination::default());
        assert_eq!(zones.len(), 2);
    }

    #[test]
    fn ties_prefer_larger_area_then_lower_index() {
        assert_eq!(prefer((4.0, 10.0, 3), (4.0, 20.0, 1)), Ordering::Less);
        assert_eq!(prefer((4.0, 20.0, 1), (4.0, 20.0, 3)), Ordering::Greater);
        assert_eq!(prefer((5.0, 1.0, 9), (4.0, 20.0, 1)), Ordering::Greater);
    }
}

// End of File
