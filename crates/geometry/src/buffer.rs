// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Buffering (Minkowski-sum offsetting) of arbitrary feature geometry.
//!
//! For a geometry G and a disk D of radius r the buffer is
//! ```text
//! G ⊕ D = {g + d | g ∈ G, d ∈ D}
//! ```
//! Points become regular polygonal discs and polygons are offset with rounded
//! corners, both through `geo-buf`'s straight-skeleton offsetting.  `geo-buf`
//! has no support for lines, so a line string is buffered as the union of one
//! round-capped capsule per segment.
//!
//! Positive distances grow the geometry.  Negative distances shrink polygons
//! and erase points and lines.

use crate::errors::InvalidGeometryError;
use crate::float_types::{Real, Tolerance};
use crate::overlay::{dissolve_union, drop_slivers};
use crate::segment;
use crate::validate::validate_geometry;
use geo::{Coord, Geometry, Line, LineString, MultiPolygon, Orient, Point, Polygon, orient::Direction};
use geo_buf::{buffer_multi_polygon_rounded, buffer_point, buffer_polygon_rounded};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tuning of the polygonal approximation of round buffers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferOptions {
    /// Number of vertices used to approximate a full circle.
    pub resolution: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self { resolution: 64 }
    }
}

impl BufferOptions {
    fn segments(&self) -> usize {
        self.resolution.max(8)
    }
}

/// Buffer `geom` by `distance`.
///
/// Fails with [`InvalidGeometryError`] on degenerate input or a non-finite
/// distance; never panics on empty collections, which buffer to nothing.
pub fn buffer(
    geom: &Geometry<Real>,
    distance: Real,
    options: &BufferOptions,
    tol: &Tolerance,
) -> Result<MultiPolygon<Real>, InvalidGeometryError> {
    if !distance.is_finite() {
        return Err(InvalidGeometryError::InvalidDistance(distance));
    }
    validate_geometry(geom, tol)?;
    let raw = buffer_unchecked(geom, distance, options, tol);
    Ok(drop_slivers(raw.orient(Direction::Default), tol))
}

fn buffer_unchecked(
    geom: &Geometry<Real>,
    distance: Real,
    options: &BufferOptions,
    tol: &Tolerance,
) -> MultiPolygon<Real> {
    match geom {
        Geometry::Point(p) => disc(p, distance, options),
        Geometry::MultiPoint(mp) => {
            let discs: Vec<_> = mp.iter().map(|p| disc(p, distance, options)).collect();
            dissolve_union(&discs, tol)
        },
        Geometry::Line(l) => buffer_lines(&[*l], distance, options, tol),
        Geometry::LineString(ls) => buffer_line_string(ls, distance, options, tol),
        Geometry::MultiLineString(mls) => {
            let lines: Vec<Line<Real>> = mls.iter().flat_map(|ls| ls.lines()).collect();
            buffer_lines(&lines, distance, options, tol)
        },
        Geometry::Polygon(p) => buffer_polygon_rounded(p, distance),
        Geometry::MultiPolygon(mp) => buffer_multi_polygon_rounded(mp, distance),
        Geometry::Rect(r) => buffer_polygon_rounded(&r.to_polygon(), distance),
        Geometry::Triangle(t) => buffer_polygon_rounded(&t.to_polygon(), distance),
        Geometry::GeometryCollection(gc) => {
            let parts: Vec<_> = gc
                .iter()
                .map(|g| buffer_unchecked(g, distance, options, tol))
                .collect();
            dissolve_union(&parts, tol)
        },
    }
}

fn disc(point: &Point<Real>, distance: Real, options: &BufferOptions) -> MultiPolygon<Real> {
    if distance <= 0.0 {
        return MultiPolygon(Vec::new());
    }
    MultiPolygon(vec![buffer_point(point, distance, options.segments())])
}

fn buffer_line_string(
    line: &LineString<Real>,
    distance: Real,
    options: &BufferOptions,
    tol: &Tolerance,
) -> MultiPolygon<Real> {
    let lines: Vec<Line<Real>> = line.lines().collect();
    buffer_lines(&lines, distance, options, tol)
}

fn buffer_lines(
    lines: &[Line<Real>],
    distance: Real,
    options: &BufferOptions,
    tol: &Tolerance,
) -> MultiPolygon<Real> {
    if distance <= 0.0 {
        return MultiPolygon(Vec::new());
    }
    let capsules: Vec<MultiPolygon<Real>> = lines
        .iter()
        .filter(|l| !tol.is_zero_length(segment::length(l)))
        .map(|l| MultiPolygon(vec![capsule(l, distance, options.segments())]))
        .collect();
    dissolve_union(&capsules, tol)
}

/// The set of points within `radius` of the segment: a rectangle with a
/// half-disc on each end, wound counter-clockwise.
fn capsule(line: &Line<Real>, radius: Real, resolution: usize) -> Polygon<Real> {
    let heading = line.dy().atan2(line.dx());
    let half = (resolution / 2).max(4);
    let step = PI / half as Real;

    let arc = |center: Coord<Real>, from: Real| {
        (0..=half).map(move |i| {
            let angle = from + step * i as Real;
            Coord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
    };

    let mut ring: Vec<Coord<Real>> = arc(line.end, heading - PI / 2.0).collect();
    ring.extend(arc(line.start, heading + PI / 2.0));
    ring.push(ring[0]);
    Polygon::new(LineString::new(ring), Vec::new())
}


// End of File
