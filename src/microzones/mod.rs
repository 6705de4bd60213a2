// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Microzones
//!
//! Subdivide a boundary into zones along a road network:
//!
//! 1. dissolve the boundary features and take their outline
//! 2. select road features and clip them to the boundary
//! 3. node and polygonize roads plus outline into preliminary zones
//! 4. merge undersized zones into neighbours, once per area threshold
//! 5. repair zones left with holes
//! 6. order the zones and assign their identities
//!
//! Each stage consumes the previous stage's output; nothing is shared between
//! builds.

mod arrangement;
mod eliminate;
mod rings;

use crate::error::{Result, ZonationError};
use crate::identity::{Zone, ZoneIdentityAssigner};
use config::{EngineConfig, IdentitySettings, MicrozoneSettings};
use geo::MultiPolygon;
use geometry::measure::centroid;
use geometry::{FeatureFilter, FeatureSet, Predicate, Real, Record, Tolerance};
use log::{debug, info};
use serde::Serialize;

/// Outcome of one elimination threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThresholdReport {
    pub threshold: Real,
    pub merges: usize,
    pub sweeps: usize,
}

/// What each stage of a build did.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BuildReport {
    pub preliminary_zones: usize,
    pub pruned_edges: usize,
    pub thresholds: Vec<ThresholdReport>,
    /// Zones that kept their occupied holes (or absorbed what they held) in
    /// the last repair pass.
    pub set_aside_zones: usize,
    pub erased_zones: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MicrozoneBuild {
    pub zones: Vec<Zone>,
    pub report: BuildReport,
}

pub struct MicrozoneBuilder {
    tolerance: Tolerance,
    settings: MicrozoneSettings,
    identity: IdentitySettings,
}

impl MicrozoneBuilder {
    pub fn new(tolerance: Tolerance, settings: MicrozoneSettings, identity: IdentitySettings) -> Self {
        Self {
            tolerance,
            settings,
            identity,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.tolerance,
            config.microzones.clone(),
            config.identity.clone(),
        )
    }

    /// Build zones using the configured road filter, or every road when none
    /// is configured.
    pub fn build(
        &self,
        roads: &FeatureSet,
        boundary: &FeatureSet,
        parents: Option<&FeatureSet>,
    ) -> Result<MicrozoneBuild> {
        let all = Predicate::All;
        let filter = self.settings.road_filter.as_ref().unwrap_or(&all);
        self.build_with_filter(roads, filter, boundary, parents)
    }

    pub fn build_with_filter(
        &self,
        roads: &FeatureSet,
        filter: &dyn FeatureFilter,
        boundary: &FeatureSet,
        parents: Option<&FeatureSet>,
    ) -> Result<MicrozoneBuild> {
        self.check_settings()?;
        if boundary.is_empty() {
            return Err(ZonationError::EmptyInput("boundary feature set"));
        }
        let tol = &self.tolerance;
        let mut report = BuildReport::default();

        info!("Dissolving {} boundary features", boundary.len());
        let region = arrangement::dissolve_boundary(boundary, tol)?;
        if region.0.is_empty() {
            return Err(ZonationError::EmptyInput("dissolved boundary"));
        }

        info!("Clipping road network to the boundary");
        let roads = arrangement::clip_roads(roads, filter, &region, tol)?;
        debug!("{} road lines after clipping", roads.len());

        info!("Polygonizing preliminary zones");
        let (mut zones, pruned) =
            arrangement::preliminary_zones(&region, roads, self.settings.prune_cut_edges, tol)?;
        report.preliminary_zones = zones.len();
        report.pruned_edges = pruned;
        debug!("{} preliminary zones", zones.len());

        for &threshold in &self.settings.thresholds {
            info!("Eliminating zones smaller than {}", threshold);
            let outcome = eliminate::eliminate(&mut zones, threshold, self.settings.max_sweeps, tol)?;
            debug!(
                "{} merges in {} sweeps, {} zones left",
                outcome.merges,
                outcome.sweeps,
                zones.len()
            );
            report.thresholds.push(ThresholdReport {
                threshold,
                merges: outcome.merges,
                sweeps: outcome.sweeps,
            });
        }

        info!("Repairing zone rings");
        for _ in 0..self.settings.ring_repair_passes {
            let (repaired, repair) = rings::repair_rings(zones, &region, self.settings.enclosed_zones);
            zones = repaired;
            report.set_aside_zones = repair.set_aside;
            report.erased_zones += repair.erased;
        }

        info!("Assigning identities to {} zones", zones.len());
        order_by_centroid(&mut zones);
        let assigner = ZoneIdentityAssigner::new(self.identity.clone());
        let zones = assigner.assign(zones.into_iter().map(|z| (z, Record::new())), parents);
        Ok(MicrozoneBuild { zones, report })
    }

    fn check_settings(&self) -> Result<()> {
        let thresholds = &self.settings.thresholds;
        if thresholds.is_empty() {
            return Err(ZonationError::InvalidParameter(
                "at least one elimination threshold is required".to_owned(),
            ));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(ZonationError::InvalidParameter(
                "elimination thresholds must be finite".to_owned(),
            ));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ZonationError::InvalidParameter(format!(
                "elimination thresholds {thresholds:?} are not strictly increasing"
            )));
        }
        Ok(())
    }
}

/// Sort by centroid x, then y.  Zones without a centroid go last.
fn order_by_centroid(zones: &mut [MultiPolygon<Real>]) {
    zones.sort_by_cached_key(|zone| {
        let key = centroid(zone).map(|c| (c.x(), c.y()));
        (key.is_none(), OrderedCoord(key.unwrap_or_default()))
    });
}

#[derive(Copy, Clone, PartialEq)]
struct OrderedCoord((Real, Real));

impl Eq for OrderedCoord {}

impl PartialOrd for OrderedCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (ax, ay) = self.0;
        let (bx, by) = other.0;
        ax.total_cmp(&bx).then(ay.total_cmp(&by))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_must_increase() {
        let settings = MicrozoneSettings {
            thresholds: vec![15000.0, 5000.0],
            ..MicrozoneSettings::default()
        };
        let builder = MicrozoneBuilder::new(Tolerance::default(), settings, IdentitySettings::default());
        assert!(matches!(builder.check_settings(), Err(ZonationError::InvalidParameter(_))));
    }

    #[test]
    fn empty_thresholds_are_rejected() {
        let settings = MicrozoneSettings {
            thresholds: Vec::new(),
            ..MicrozoneSettings::default()
        };
        let builder = MicrozoneBuilder::new(Tolerance::default(), settings, IdentitySettings::default());
        assert!(matches!(builder.check_settings(), Err(ZonationError::InvalidParameter(_))));
    }

    #[test]
    fn centroid_order_is_x_then_y() {
        use geo::polygon;
        let cell = |x: Real, y: Real| {
            MultiPolygon(vec![polygon![
                (x: x, y: y),
                (x: x + 1.0, y: y),
                (x: x + 1.0, y: y + 1.0),
                (x: x, y: y + 1.0),
            ]])
        };
        let mut zones = vec![cell(5.0, 0.0), cell(0.0, 5.0), cell(0.0, 0.0)];
        order_by_centroid(&mut zones);
        assert_eq!(zones, vec![cell(0.0, 0.0), cell(0.0, 5.0), cell(5.0, 0.0)]);
    }
}

// End of File
