// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Noding: split a set of polylines at every point where they touch, cross
//! or overlap so the result only meets at shared endpoints.

use crate::float_types::{Real, Tolerance};
use crate::planar::VertexIndex;
use crate::segment::{self, SegmentIntersection};
use geo::{Coord, Line, LineString};

/// Split `lines` into a fully noded set of distinct segments.
///
/// Crossing points, touching points and the ends of collinear overlaps all
/// become vertices; vertices within tolerance of each other are merged, and a
/// segment shared by several inputs is emitted once.  The output order only
/// depends on the input order.
pub fn node_lines(lines: &[LineString<Real>], tol: &Tolerance) -> Vec<Line<Real>> {
    let segments: Vec<Line<Real>> = lines
        .iter()
        .flat_map(|ls| ls.lines())
        .filter(|l| !tol.is_zero_length(segment::length(l)))
        .collect();

    let mut splits: Vec<Vec<Coord<Real>>> = segments.iter().map(|l| vec![l.start, l.end]).collect();
    for (i, j) in segment::candidate_pairs(&segments, tol.epsilon) {
        match segment::intersect(&segments[i], &segments[j], tol) {
            SegmentIntersection::None => {},
            SegmentIntersection::Point(p) => {
                splits[i].push(p);
                splits[j].push(p);
            },
            SegmentIntersection::Overlap(p, q) => {
                splits[i].extend([p, q]);
                splits[j].extend([p, q]);
            },
        }
    }

    let mut index = VertexIndex::new(tol);
    for seg in &segments {
        index.insert(seg.start);
        index.insert(seg.end);
    }

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (seg, points) in segments.iter().zip(splits.iter_mut()) {
        points.sort_by(|a, b| segment::project(seg, *a).total_cmp(&segment::project(seg, *b)));
        let ids: Vec<usize> = points.iter().map(|&p| index.insert(p)).collect();
        edges.extend(
            ids.windows(2)
                .filter(|w| w[0] != w[1])
                .map(|w| (w[0].min(w[1]), w[0].max(w[1]))),
        );
    }
    edges.sort_unstable();
    edges.dedup();

    edges
        .into_iter()
        .map(|(u, v)| Line::new(index.coord(u), index.coord(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn crossing_lines_are_split_in_four() {
        let tol = Tolerance::default();
        let lines = vec![
            LineString::from(vec![(0.0, 0.0), (10.0, 10.0)]),
            LineString::from(vec![(0.0, 10.0), (10.0, 0.0)]),
        ];
        let noded = node_lines(&lines, &tol);
        assert_eq!(noded.len(), 4);
        let center = coord! { x: 5.0, y: 5.0 };
        assert!(noded.iter().all(|l| tol.coincident(l.start, center) || tol.coincident(l.end, center)));
    }

    #[test]
    fn t_junction_splits_the_through_line() {
        let tol = Tolerance::default();
        let lines = vec![
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]),
            LineString::from(vec![(4.0, 0.0), (4.0, 6.0)]),
        ];
        assert_eq!(node_lines(&lines, &tol).len(), 3);
    }

    #[test]
    fn shared_segments_are_emitted_once() {
        let tol = Tolerance::default();
        let lines = vec![
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]),
            LineString::from(vec![(5.0, 0.0), (15.0, 0.0)]),
            LineString::from(vec![(10.0, 0.0), (0.0, 0.0)]),
        ];
        let noded = node_lines(&lines, &tol);
        let total: Real = noded.iter().map(segment::length).sum();
        assert_eq!(noded.len(), 3);
        assert!((total - 15.0).abs() < 1e-9);
    }
}

// End of File
