// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Measures, ring/part decomposition and adjacency of polygons.

use crate::float_types::{Real, Tolerance};
use crate::segment::{self, SegmentIntersection};
use geo::{
    Area, BoundingRect, Centroid, InteriorPoint, Line, LineString, MultiLineString, MultiPolygon,
    Point, Polygon, Rect,
};

pub fn area(mpoly: &MultiPolygon<Real>) -> Real {
    mpoly.unsigned_area()
}

/// Positive for counter-clockwise exterior rings.
pub fn signed_area(poly: &Polygon<Real>) -> Real {
    poly.signed_area()
}

pub fn centroid(mpoly: &MultiPolygon<Real>) -> Option<Point<Real>> {
    mpoly.centroid()
}

/// A point guaranteed to lie inside the polygon (unlike the centroid of a
/// concave or holed shape).
pub fn interior_point(mpoly: &MultiPolygon<Real>) -> Option<Point<Real>> {
    mpoly.interior_point()
}

/// Number of disjoint exterior contours.
pub fn part_count(mpoly: &MultiPolygon<Real>) -> usize {
    mpoly.0.len()
}

/// Number of interior rings (holes) across all parts.
pub fn ring_count(mpoly: &MultiPolygon<Real>) -> usize {
    mpoly.0.iter().map(|p| p.interiors().len()).sum()
}

/// Number of closed contours making up the boundary: exteriors plus holes.
pub fn boundary_contour_count(mpoly: &MultiPolygon<Real>) -> usize {
    part_count(mpoly) + ring_count(mpoly)
}

pub fn parts(mpoly: &MultiPolygon<Real>) -> Vec<Polygon<Real>> {
    mpoly.0.clone()
}

/// Exterior ring first, then the holes in order.
pub fn rings(poly: &Polygon<Real>) -> Vec<LineString<Real>> {
    std::iter::once(poly.exterior().clone())
        .chain(poly.interiors().iter().cloned())
        .collect()
}

/// The boundary of a polygon set as closed polylines.
pub fn outline(mpoly: &MultiPolygon<Real>) -> MultiLineString<Real> {
    MultiLineString(mpoly.0.iter().flat_map(rings).collect())
}

/// The polygon with every hole collapsed into its exterior contour.
pub fn fill_holes(poly: &Polygon<Real>) -> Polygon<Real> {
    Polygon::new(poly.exterior().clone(), Vec::new())
}

/// All non-degenerate boundary segments.
pub fn segments(mpoly: &MultiPolygon<Real>, tol: &Tolerance) -> Vec<Line<Real>> {
    mpoly
        .0
        .iter()
        .flat_map(rings)
        .flat_map(|ring| ring.lines().collect::<Vec<_>>())
        .filter(|l| !tol.is_zero_length(segment::length(l)))
        .collect()
}

fn rects_touch(a: Rect<Real>, b: Rect<Real>, eps: Real) -> bool {
    a.min().x <= b.max().x + eps
        && b.min().x <= a.max().x + eps
        && a.min().y <= b.max().y + eps
        && b.min().y <= a.max().y + eps
}

/// Length of boundary shared by `a` and `b`: the total of collinear overlaps
/// between their boundary segments.  Touching at isolated points counts zero.
pub fn shared_boundary_length(
    a: &MultiPolygon<Real>,
    b: &MultiPolygon<Real>,
    tol: &Tolerance,
) -> Real {
    match (a.bounding_rect(), b.bounding_rect()) {
        (Some(ra), Some(rb)) if rects_touch(ra, rb, tol.epsilon) => {},
        _ => return 0.0,
    }

    let segs_a = segments(a, tol);
    let split = segs_a.len();
    let mut all = segs_a;
    all.extend(segments(b, tol));

    segment::candidate_pairs(&all, tol.epsilon)
        .into_iter()
        .filter(|&(i, j)| i < split && j >= split)
        .map(|(i, j)| match segment::intersect(&all[i], &all[j], tol) {
            SegmentIntersection::Overlap(p, q) => (p.x - q.x).hypot(p.y - q.y),
            _ => 0.0,
        })
        .sum()
}

/// Two polygons are adjacent when they share a boundary of non-zero length.
pub fn adjacent(a: &MultiPolygon<Real>, b: &MultiPolygon<Real>, tol: &Tolerance) -> bool {
    !tol.is_zero_length(shared_boundary_length(a, b, tol))
}

// End of File
