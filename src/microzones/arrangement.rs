// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Preliminary zones: the faces cut out of the boundary by the road network.

use crate::error::{Result, ZonationError};
use geo::{BooleanOps, Contains, Geometry, LineString, MultiLineString, MultiPolygon};
use geometry::measure::{interior_point, outline};
use geometry::noding::node_lines;
use geometry::overlay::dissolve_union;
use geometry::polygonize::{polygonize, prune_cut_edges};
use geometry::validate::{validate_line_string, validate_polygon};
use geometry::{FeatureFilter, FeatureSet, Real, Tolerance};
use log::{debug, warn};

/// Dissolve every boundary feature into one polygon set.
pub(crate) fn dissolve_boundary(boundary: &FeatureSet, tol: &Tolerance) -> Result<MultiPolygon<Real>> {
    let mut parts = Vec::with_capacity(boundary.len());
    for geometry in boundary.geometries() {
        let mpoly = match geometry {
            Geometry::Polygon(p) => MultiPolygon(vec![p.clone()]),
            Geometry::MultiPolygon(mp) => mp.clone(),
            Geometry::Rect(r) => MultiPolygon(vec![r.to_polygon()]),
            Geometry::Triangle(t) => MultiPolygon(vec![t.to_polygon()]),
            _ => {
                return Err(ZonationError::InvalidParameter(
                    "boundary features must be polygons".to_owned(),
                ));
            },
        };
        for poly in &mpoly.0 {
            validate_polygon(poly, tol)?;
        }
        parts.push(mpoly);
    }
    Ok(dissolve_union(&parts, tol))
}

/// Line work of the road features the filter accepts, clipped to `boundary`.
pub(crate) fn clip_roads(
    roads: &FeatureSet,
    filter: &dyn FeatureFilter,
    boundary: &MultiPolygon<Real>,
    tol: &Tolerance,
) -> Result<Vec<LineString<Real>>> {
    let mut lines = Vec::new();
    let mut selected = 0;
    for feature in roads.select(filter) {
        selected += 1;
        match &feature.geometry {
            Geometry::Line(l) => lines.push(LineString::new(vec![l.start, l.end])),
            Geometry::LineString(ls) => lines.push(ls.clone()),
            Geometry::MultiLineString(mls) => lines.extend(mls.0.iter().cloned()),
            _ => {
                return Err(ZonationError::InvalidParameter(
                    "road features must be lines".to_owned(),
                ));
            },
        }
    }
    for line in &lines {
        validate_line_string(line, tol)?;
    }
    debug!("{} of {} road features selected", selected, roads.len());

    let clipped = boundary.clip(&MultiLineString(lines), false);
    Ok(clipped
        .0
        .into_iter()
        .filter(|ls| ls.0.len() >= 2)
        .collect())
}

/// Polygonize the boundary outline together with the clipped roads.
///
/// Returns the zones inside the boundary, one polygon each, and the number of
/// dangling or bridging edges removed beforehand.
pub(crate) fn preliminary_zones(
    boundary: &MultiPolygon<Real>,
    roads: Vec<LineString<Real>>,
    prune: bool,
    tol: &Tolerance,
) -> Result<(Vec<MultiPolygon<Real>>, usize)> {
    let mut work = outline(boundary).0;
    work.extend(roads);
    let mut edges = node_lines(&work, tol);

    let mut pruned = 0;
    if prune {
        (edges, pruned) = prune_cut_edges(&edges, tol);
        if pruned > 0 {
            warn!("Removed {} dangling or bridging road edges", pruned);
        }
    }

    // Faces filling holes of the boundary are not part of it.
    let zones = polygonize(&edges, tol)?
        .into_iter()
        .map(|p| MultiPolygon(vec![p]))
        .filter(|zone| interior_point(zone).is_some_and(|p| boundary.contains(&p)))
        .collect();
    Ok((zones, pruned))
}

// End of File
