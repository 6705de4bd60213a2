// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Segment predicates.
//!
//! Orientation is decided with Shewchuk's adaptive-precision `orient2d` from the
//! `robust` crate, so the sign of every turn test is exact.  Distances are plain
//! floating point and compared against the shared [`Tolerance`].

use crate::float_types::{Real, Tolerance};
use geo::{Coord, Line};
use robust::{Coord as RobustCoord, orient2d};

const fn robust_coord(c: Coord<Real>) -> RobustCoord<Real> {
    RobustCoord { x: c.x, y: c.y }
}

/// Twice the signed area of the triangle `a, b, c`: positive when `c` lies to
/// the left of the directed line `a -> b`.
pub fn orientation(a: Coord<Real>, b: Coord<Real>, c: Coord<Real>) -> Real {
    orient2d(robust_coord(a), robust_coord(b), robust_coord(c))
}

pub fn length(line: &Line<Real>) -> Real {
    line.dx().hypot(line.dy())
}

/// Parameter of the orthogonal projection of `p` onto the supporting line of
/// `line` (0 at `start`, 1 at `end`, unclamped).
pub fn project(line: &Line<Real>, p: Coord<Real>) -> Real {
    let (dx, dy) = (line.dx(), line.dy());
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }
    ((p.x - line.start.x) * dx + (p.y - line.start.y) * dy) / len2
}

pub fn point_at(line: &Line<Real>, t: Real) -> Coord<Real> {
    Coord {
        x: line.start.x + t * line.dx(),
        y: line.start.y + t * line.dy(),
    }
}

/// Euclidean distance from `p` to the closed segment.
pub fn distance_to_point(line: &Line<Real>, p: Coord<Real>) -> Real {
    let t = project(line, p).clamp(0.0, 1.0);
    let q = point_at(line, t);
    (p.x - q.x).hypot(p.y - q.y)
}

fn distance_to_supporting_line(line: &Line<Real>, p: Coord<Real>) -> Real {
    let len = length(line);
    if len == 0.0 {
        return (p.x - line.start.x).hypot(p.y - line.start.y);
    }
    orientation(line.start, line.end, p).abs() / len
}

/// How two segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// The segments touch or cross in a single point.
    Point(Coord<Real>),
    /// The segments are collinear and share the sub-segment between the two points.
    Overlap(Coord<Real>, Coord<Real>),
}

fn boxes_overlap(a: &Line<Real>, b: &Line<Real>, eps: Real) -> bool {
    a.start.x.min(a.end.x) <= b.start.x.max(b.end.x) + eps
        && b.start.x.min(b.end.x) <= a.start.x.max(a.end.x) + eps
        && a.start.y.min(a.end.y) <= b.start.y.max(b.end.y) + eps
        && b.start.y.min(b.end.y) <= a.start.y.max(a.end.y) + eps
}

/// Intersect two closed segments.
///
/// Endpoints lying within tolerance of the other segment are reported as the
/// endpoint itself, so callers splitting at the result never move an existing
/// node.
pub fn intersect(a: &Line<Real>, b: &Line<Real>, tol: &Tolerance) -> SegmentIntersection {
    let eps = tol.epsilon;
    if !boxes_overlap(a, b, eps) {
        return SegmentIntersection::None;
    }

    let len_a = length(a);
    if len_a > eps
        && distance_to_supporting_line(a, b.start) <= eps
        && distance_to_supporting_line(a, b.end) <= eps
    {
        return collinear_overlap(a, b, len_a, eps);
    }

    for (p, other) in [(a.start, b), (a.end, b), (b.start, a), (b.end, a)] {
        if distance_to_point(other, p) <= eps {
            return SegmentIntersection::Point(p);
        }
    }

    let o1 = orientation(a.start, a.end, b.start);
    let o2 = orientation(a.start, a.end, b.end);
    let o3 = orientation(b.start, b.end, a.start);
    let o4 = orientation(b.start, b.end, a.end);
    if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
        let (dax, day) = (a.dx(), a.dy());
        let (dbx, dby) = (b.dx(), b.dy());
        let denom = dax * dby - day * dbx;
        if denom == 0.0 {
            return SegmentIntersection::None;
        }
        let t = ((b.start.x - a.start.x) * dby - (b.start.y - a.start.y) * dbx) / denom;
        return SegmentIntersection::Point(point_at(a, t));
    }

    SegmentIntersection::None
}

fn collinear_overlap(a: &Line<Real>, b: &Line<Real>, len_a: Real, eps: Real) -> SegmentIntersection {
    let t0 = project(a, b.start);
    let t1 = project(a, b.end);
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);
    let slack = eps / len_a;

    if hi < lo - slack {
        return SegmentIntersection::None;
    }
    if (hi - lo) * len_a <= eps {
        // Touching end to end: prefer whichever endpoint sits there already.
        let p = point_at(a, (lo + hi) * 0.5);
        return SegmentIntersection::Point(snap_to_endpoints(p, a, b, eps));
    }

    let start = snap_to_endpoints(point_at(a, lo), a, b, eps);
    let end = snap_to_endpoints(point_at(a, hi), a, b, eps);
    SegmentIntersection::Overlap(start, end)
}

fn snap_to_endpoints(p: Coord<Real>, a: &Line<Real>, b: &Line<Real>, eps: Real) -> Coord<Real> {
    [a.start, a.end, b.start, b.end]
        .into_iter()
        .find(|c| (c.x - p.x).hypot(c.y - p.y) <= eps)
        .unwrap_or(p)
}

/// Index pairs `(i, j)` with `i < j` whose bounding boxes overlap (expanded by
/// `eps`).  A sweep over the minimum x keeps this near-linear for sparse line
/// work such as road networks.
pub fn candidate_pairs(lines: &[Line<Real>], eps: Real) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..lines.len()).collect();
    let min_x = |l: &Line<Real>| l.start.x.min(l.end.x);
    order.sort_by(|&i, &j| min_x(&lines[i]).total_cmp(&min_x(&lines[j])).then(i.cmp(&j)));

    let mut pairs = Vec::new();
    for (pos, &i) in order.iter().enumerate() {
        let a = &lines[i];
        let max_x = a.start.x.max(a.end.x) + eps;
        for &j in &order[pos + 1..] {
            let b = &lines[j];
            if min_x(b) > max_x {
                break;
            }
            if boxes_overlap(a, b, eps) {
                pairs.push((i.min(j), i.max(j)));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}


// End of File
