// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use geometry::{InvalidGeometryError, Real, TopologyError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZonationError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] InvalidGeometryError),
    /// A required input collection was empty; names the input
    #[error("{0} is empty")]
    EmptyInput(&'static str),
    #[error("line network cannot be polygonized: {0}")]
    Topology(#[from] TopologyError),
    /// Small-zone elimination was still merging when its sweep limit ran out
    #[error("elimination below {threshold} did not converge within {sweeps} sweeps")]
    Convergence { threshold: Real, sweeps: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ZonationError>;

// End of File
