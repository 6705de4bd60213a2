// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Rejection of degenerate input before it reaches buffering or overlay.

use crate::errors::InvalidGeometryError;
use crate::float_types::{Real, Tolerance};
use crate::segment::{self, SegmentIntersection};
use geo::{Coord, Geometry, Line, LineString, Polygon};

pub fn validate_coord(c: Coord<Real>) -> Result<(), InvalidGeometryError> {
    if c.x.is_finite() && c.y.is_finite() {
        Ok(())
    } else {
        Err(InvalidGeometryError::InvalidCoordinate(c))
    }
}

/// A line string needs two finite points and a measurable length.
pub fn validate_line_string(
    line: &LineString<Real>,
    tol: &Tolerance,
) -> Result<(), InvalidGeometryError> {
    let first = line.0.first().copied().unwrap_or_default();
    if line.0.len() < 2 {
        return Err(InvalidGeometryError::TooFewPoints(first));
    }
    line.0.iter().copied().try_for_each(validate_coord)?;

    let total: Real = line.lines().map(|l| segment::length(&l)).sum();
    if tol.is_zero_length(total) {
        return Err(InvalidGeometryError::ZeroLength(first));
    }
    Ok(())
}

/// A ring must be closed, have at least four points and never cross itself.
pub fn validate_ring(ring: &LineString<Real>, tol: &Tolerance) -> Result<(), InvalidGeometryError> {
    let first = ring.0.first().copied().unwrap_or_default();
    if ring.0.len() < 4 {
        return Err(InvalidGeometryError::TooFewPoints(first));
    }
    ring.0.iter().copied().try_for_each(validate_coord)?;
    if !ring.is_closed() {
        return Err(InvalidGeometryError::RingNotClosed(first));
    }

    let edges: Vec<Line<Real>> = ring
        .lines()
        .filter(|l| !tol.is_zero_length(segment::length(l)))
        .collect();
    if edges.len() < 3 {
        return Err(InvalidGeometryError::TooFewPoints(first));
    }

    let n = edges.len();
    for (i, j) in segment::candidate_pairs(&edges, tol.epsilon) {
        let neighbours = j == i + 1 || (i == 0 && j == n - 1);
        match segment::intersect(&edges[i], &edges[j], tol) {
            SegmentIntersection::None => {},
            // Consecutive edges always share their common vertex.
            SegmentIntersection::Point(_) if neighbours => {},
            SegmentIntersection::Point(p) | SegmentIntersection::Overlap(p, _) => {
                return Err(InvalidGeometryError::RingSelfIntersection(p));
            },
        }
    }
    Ok(())
}

pub fn validate_polygon(poly: &Polygon<Real>, tol: &Tolerance) -> Result<(), InvalidGeometryError> {
    validate_ring(poly.exterior(), tol)?;
    poly.interiors()
        .iter()
        .try_for_each(|ring| validate_ring(ring, tol))
}

/// Validate any supported geometry, recursing into multi-geometries and collections.
pub fn validate_geometry(
    geom: &Geometry<Real>,
    tol: &Tolerance,
) -> Result<(), InvalidGeometryError> {
    match geom {
        Geometry::Point(p) => validate_coord(p.0),
        Geometry::MultiPoint(mp) => mp.iter().try_for_each(|p| validate_coord(p.0)),
        Geometry::Line(l) => validate_line_string(&LineString::from(vec![l.start, l.end]), tol),
        Geometry::LineString(ls) => validate_line_string(ls, tol),
        Geometry::MultiLineString(mls) => {
            mls.iter().try_for_each(|ls| validate_line_string(ls, tol))
        },
        Geometry::Polygon(p) => validate_polygon(p, tol),
        Geometry::MultiPolygon(mp) => mp.iter().try_for_each(|p| validate_polygon(p, tol)),
        Geometry::Rect(r) => validate_polygon(&r.to_polygon(), tol),
        Geometry::Triangle(t) => validate_polygon(&t.to_polygon(), tol),
        Geometry::GeometryCollection(gc) => gc.iter().try_for_each(|g| validate_geometry(g, tol)),
    }
}


// End of File
