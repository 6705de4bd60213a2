// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Zonation Geometry Kernel
//!
//! Planar geometry primitives for the zonation engine, built on [`geo`]:
//!
//! - **buffer**: Minkowski-sum offsetting of any feature geometry, via `geo-buf`
//! - **overlay**: union, difference, intersection area and dissolve of polygon sets
//! - **noding / polygonize**: turn a line arrangement into the polygons it encloses
//! - **measure**: areas, centroids, interior points, rings, parts and shared boundaries
//! - **feature / filter**: attributed feature sets and the predicates that select from them
//!
//! Every operation takes the same [`Tolerance`], so "zero length", "zero area"
//! and "same vertex" mean the same thing everywhere.
//!
//! #### Optional features
//! - **parallel**: use rayon for the pairwise reductions of dissolve

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod buffer;
pub mod errors;
pub mod feature;
pub mod filter;
pub mod float_types;
pub mod measure;
pub mod noding;
pub mod overlay;
pub mod polygonize;
pub mod segment;
pub mod validate;

mod planar;

pub use buffer::{BufferOptions, buffer};
pub use errors::{InvalidGeometryError, TopologyError};
pub use feature::{AttributeValue, CoordinateReference, Feature, FeatureSet, LinearUnit, Record};
pub use filter::{FeatureFilter, Predicate};
pub use float_types::{EPSILON, Real, Tolerance};


// End of File
