// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Per-builder settings.  Every field has a default so a config file only
//! needs to name what it changes.

use geometry::{LinearUnit, Predicate, Real};
use serde::{Deserialize, Serialize};

/// Settings for multi-ring buffering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingBufferOptions {
    /// Attribute that receives each band's distance.
    pub field_name: String,
    /// Unit the distances are given in.
    pub unit: LinearUnit,
}

impl Default for RingBufferOptions {
    fn default() -> Self {
        Self {
            field_name: "distance".to_owned(),
            unit: LinearUnit::Meters,
        }
    }
}

/// What ring repair does with a zone whose holes are occupied by other zones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnclosedZonePolicy {
    /// Keep the enclosed zones; the enclosing zone keeps the holes they fill.
    #[default]
    PreserveEnclosed,
    /// Fill every hole of the enclosing zone and erase the zones inside it.
    Absorb,
}

/// Settings for building microzones from a road network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicrozoneSettings {
    /// Minimum zone areas, strictly increasing, in square CRS units.  Each
    /// threshold runs its own elimination pass.
    pub thresholds: Vec<Real>,
    /// Optional cap on elimination sweeps per threshold.  Every sweep that
    /// merges removes a zone, so elimination ends on its own; unset means no
    /// cap.
    pub max_sweeps: Option<usize>,
    pub ring_repair_passes: usize,
    pub enclosed_zones: EnclosedZonePolicy,
    /// Drop dangles and bridges before polygonizing instead of failing on them.
    pub prune_cut_edges: bool,
    /// Which road features take part; all of them when unset.
    pub road_filter: Option<Predicate>,
}

impl Default for MicrozoneSettings {
    fn default() -> Self {
        Self {
            thresholds: vec![5000.0, 15000.0],
            max_sweeps: None,
            ring_repair_passes: 2,
            enclosed_zones: EnclosedZonePolicy::default(),
            prune_cut_edges: true,
            road_filter: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    /// Id of the first zone; the rest follow densely.
    pub first_id: i64,
    /// Attribute of the parent layer holding the parent identifier.
    pub parent_id_field: String,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            first_id: 0,
            parent_id_field: "region_id".to_owned(),
        }
    }
}

// End of File
