// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::float_types::Real;
use geo::Coord;
use thiserror::Error;

/// Malformed or degenerate input geometry. Each variant carries the coordinate
/// where the problem was found.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGeometryError {
    /// A ring or line has fewer than the minimal number of points
    #[error("too few points to form a ring or line near {0:?}")]
    TooFewPoints(Coord<Real>),
    /// The coordinate has a NaN or infinite component
    #[error("coordinate {0:?} is NaN or infinite")]
    InvalidCoordinate(Coord<Real>),
    /// The ring's first and last points differ
    #[error("ring starting at {0:?} is not closed")]
    RingNotClosed(Coord<Real>),
    /// A line with no measurable length
    #[error("line at {0:?} has zero length")]
    ZeroLength(Coord<Real>),
    /// A linear ring crosses or folds back over itself
    #[error("ring self-intersects at {0:?}")]
    RingSelfIntersection(Coord<Real>),
    /// Buffer distance is NaN or infinite
    #[error("buffer distance {0} is not finite")]
    InvalidDistance(Real),
}

/// The line arrangement handed to polygonization is not a clean planar graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// Two segments meet somewhere other than a shared node
    #[error("segments meet at {0:?} without a shared node")]
    UnnodedCrossing(Coord<Real>),
    /// An edge has the same face on both sides (dangle, undershoot or bridge)
    #[error("edge starting at {0:?} is dangling or bridges two cycles")]
    DanglingEdge(Coord<Real>),
}

// End of File
