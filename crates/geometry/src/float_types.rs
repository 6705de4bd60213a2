// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Scalar type used for every coordinate, distance and area in the engine.
pub type Real = f64;

/// Default tolerance for geometric comparisons, in CRS units.
pub const EPSILON: Real = 1e-6;

/// The single tolerance shared by every kernel function.
///
/// The same `epsilon` decides whether a length or an area is zero, whether two
/// vertices are the same node, and whether two segments touch or overlap.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub epsilon: Real,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { epsilon: EPSILON }
    }
}

impl Tolerance {
    pub const fn new(epsilon: Real) -> Self {
        Self { epsilon }
    }

    /// True if `length` is indistinguishable from zero.
    pub fn is_zero_length(&self, length: Real) -> bool {
        length.abs() <= self.epsilon
    }

    /// True if `area` is indistinguishable from zero.
    pub fn is_zero_area(&self, area: Real) -> bool {
        area.abs() <= self.epsilon
    }

    /// True if `a` and `b` snap to the same node.
    pub fn coincident(&self, a: Coord<Real>, b: Coord<Real>) -> bool {
        (a.x - b.x).hypot(a.y - b.y) <= self.epsilon
    }

    /// Edge length of the cells used to bucket vertices for snapping.
    pub(crate) fn cell_size(&self) -> Real {
        self.epsilon.max(1e-12)
    }
}

// End of File
