// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Zonation
//!
//! Builds planning zones out of planar feature sets:
//!
//! - [`RingBufferBuilder`] surrounds a feature set with disjoint concentric bands, one per
//!   distance.
//! - [`MicrozoneBuilder`] cuts a boundary into zones along a road network, merges zones that
//!   are too small into their neighbours and repairs the holes left behind.
//! - [`ZoneIdentityAssigner`] numbers zones, measures them and finds the parent region each
//!   one falls in.
//!
//! The geometry itself lives in the `zonation-geometry` crate and the tunables in
//! `zonation-config`; both are re-exported here.  Builders hold no state between calls.

pub mod error;
pub mod identity;
pub mod microzones;
pub mod ring_buffer;

pub use config::{
    EnclosedZonePolicy, EngineConfig, IdentitySettings, MicrozoneSettings, RingBufferOptions,
};
pub use error::{Result, ZonationError};
pub use geometry;
pub use identity::{Zone, ZoneIdentityAssigner};
pub use microzones::{BuildReport, MicrozoneBuild, MicrozoneBuilder, ThresholdReport};
pub use ring_buffer::{Band, RingBufferBuilder};

/// A module which is typically glob imported.
pub mod prelude {
    pub use super::{
        Band, EngineConfig, MicrozoneBuilder, RingBufferBuilder, Zone, ZoneIdentityAssigner,
        ZonationError,
    };
    pub use geometry::{
        AttributeValue, CoordinateReference, Feature, FeatureFilter, FeatureSet, LinearUnit,
        Predicate, Real, Record, Tolerance,
    };
}

// End of File
