// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Polygonization: every bounded face of a noded line arrangement becomes one
//! polygon.
//!
//! Faces are traced on the half-edge graph from [`crate::planar`].  Bounded
//! faces wind counter-clockwise and become shells.  Each connected component
//! also produces one clockwise walk around its outside; when that component
//! sits inside a face of another component the walk becomes a hole of the
//! innermost such face, otherwise it is the unbounded face and is dropped.

use crate::errors::TopologyError;
use crate::float_types::{Real, Tolerance};
use crate::planar::{PlanarGraph, snap_edges};
use crate::segment::{self, SegmentIntersection};
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Area, Coord, Line, LineString, Polygon};

/// Fail with [`TopologyError::UnnodedCrossing`] if any two segments meet
/// anywhere but a shared endpoint.
pub fn check_noded(lines: &[Line<Real>], tol: &Tolerance) -> Result<(), TopologyError> {
    let shared_endpoint = |a: &Line<Real>, b: &Line<Real>, p: Coord<Real>| {
        [a.start, a.end].iter().any(|&ea| {
            tol.coincident(ea, p) && [b.start, b.end].iter().any(|&eb| tol.coincident(ea, eb))
        })
    };

    for (i, j) in segment::candidate_pairs(lines, tol.epsilon) {
        match segment::intersect(&lines[i], &lines[j], tol) {
            SegmentIntersection::None => {},
            SegmentIntersection::Point(p) if shared_endpoint(&lines[i], &lines[j], p) => {},
            SegmentIntersection::Point(p) => return Err(TopologyError::UnnodedCrossing(p)),
            SegmentIntersection::Overlap(p, q) => {
                // The same segment given twice is harmless; it is deduplicated.
                let same = (tol.coincident(p, lines[i].start) || tol.coincident(p, lines[i].end))
                    && (tol.coincident(q, lines[i].start) || tol.coincident(q, lines[i].end))
                    && tol.is_zero_length(segment::length(&lines[i]) - segment::length(&lines[j]));
                if !same {
                    return Err(TopologyError::UnnodedCrossing(p));
                }
            },
        }
    }
    Ok(())
}

/// Polygons for every bounded face of a noded arrangement.
///
/// The input must be noded (see [`crate::noding::node_lines`]) and free of
/// dangles and bridges (see [`prune_cut_edges`]).  Polygons come back ordered
/// by their lowest, then leftmost, exterior vertex, and then by area.
pub fn polygonize(lines: &[Line<Real>], tol: &Tolerance) -> Result<Vec<Polygon<Real>>, TopologyError> {
    check_noded(lines, tol)?;
    let (coords, edges) = snap_edges(lines, tol);
    let graph = PlanarGraph::build(coords, &edges);

    if let Some(edge) = (0..graph.edge_count()).find(|&e| graph.is_cut_edge(e)) {
        return Err(TopologyError::DanglingEdge(graph.edge_line(edge).start));
    }

    let component = graph.components();
    let mut shells: Vec<(usize, Polygon<Real>, Real)> = Vec::new();
    let mut outlines: Vec<(usize, LineString<Real>)> = Vec::new();
    for face in graph.faces() {
        let owner = component[face.half_edges[0]];
        if face.signed_area > 0.0 && !tol.is_zero_area(face.signed_area) {
            shells.push((owner, Polygon::new(graph.ring(face), Vec::new()), face.signed_area));
        } else if face.signed_area < 0.0 {
            outlines.push((owner, graph.ring(face)));
        }
    }

    let mut holes: Vec<Vec<LineString<Real>>> = vec![Vec::new(); shells.len()];
    for (owner, ring) in outlines {
        let Some(&probe) = ring.0.first() else {
            continue;
        };
        let host = shells
            .iter()
            .enumerate()
            .filter(|(_, (shell_owner, shell, _))| {
                *shell_owner != owner && shell.coordinate_position(&probe) == CoordPos::Inside
            })
            .min_by(|(_, (_, _, a)), (_, (_, _, b))| a.total_cmp(b))
            .map(|(i, _)| i);
        if let Some(host) = host {
            holes[host].push(ring);
        }
    }

    let mut polygons: Vec<Polygon<Real>> = shells
        .into_iter()
        .zip(holes)
        .map(|((_, shell, _), interiors)| {
            let (exterior, _) = shell.into_inner();
            Polygon::new(exterior, interiors)
        })
        .collect();
    polygons.sort_by(|a, b| {
        lowest_left(a)
            .y
            .total_cmp(&lowest_left(b).y)
            .then(lowest_left(a).x.total_cmp(&lowest_left(b).x))
            .then(a.unsigned_area().total_cmp(&b.unsigned_area()))
    });
    Ok(polygons)
}

fn lowest_left(poly: &Polygon<Real>) -> Coord<Real> {
    poly.exterior()
        .0
        .iter()
        .copied()
        .min_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .unwrap_or_default()
}

/// Remove dangles and bridges: edges that bound the same face on both sides
/// and so can never be part of a polygon boundary.  Returns the remaining
/// edges and how many were removed.  The input must be noded.
pub fn prune_cut_edges(lines: &[Line<Real>], tol: &Tolerance) -> (Vec<Line<Real>>, usize) {
    let (coords, edges) = snap_edges(lines, tol);
    let graph = PlanarGraph::build(coords, &edges);
    let (kept, removed): (Vec<usize>, Vec<usize>) =
        (0..graph.edge_count()).partition(|&e| !graph.is_cut_edge(e));
    (kept.into_iter().map(|e| graph.edge_line(e)).collect(), removed.len())
}


// End of File
