// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Concentric ring buffers ("bands") around a feature set.
//!
//! Distances are processed from the largest to the smallest.  Each band is the
//! dissolved buffer at its distance minus the dissolved buffer at the next
//! smaller distance, and the smallest buffer is the innermost band, so bands
//! never overlap and together cover the largest buffer.

use crate::error::{Result, ZonationError};
use config::{EngineConfig, RingBufferOptions};
use geo::{Geometry, MultiPolygon};
use geometry::overlay::{difference, dissolve_union};
use geometry::{AttributeValue, BufferOptions, CoordinateReference, FeatureSet, Real, Record, Tolerance, buffer};
use log::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One ring of a multi-ring buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    pub geometry: MultiPolygon<Real>,
    /// Outer distance of the ring, in the unit the distances were given in.
    pub distance: Real,
}

pub struct RingBufferBuilder {
    tolerance: Tolerance,
    buffer: BufferOptions,
    options: RingBufferOptions,
}

impl RingBufferBuilder {
    pub fn new(tolerance: Tolerance, buffer: BufferOptions, options: RingBufferOptions) -> Self {
        Self {
            tolerance,
            buffer,
            options,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.tolerance, config.buffer, config.ring_buffer.clone())
    }

    /// Build one band per distance, outermost first.
    ///
    /// Repeated distances yield an empty band rather than an error.
    pub fn build(&self, features: &FeatureSet, distances: &[Real]) -> Result<Vec<Band>> {
        if features.is_empty() {
            return Err(ZonationError::EmptyInput("feature set"));
        }
        if distances.is_empty() {
            return Err(ZonationError::EmptyInput("distance list"));
        }
        if let Some(bad) = distances.iter().find(|d| !d.is_finite() || **d <= 0.0) {
            return Err(ZonationError::InvalidParameter(format!(
                "buffer distance {bad} must be finite and positive"
            )));
        }

        let mut sorted = distances.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));
        info!(
            "Building {} ring buffer bands around {} features",
            sorted.len(),
            features.len()
        );

        let mut bands = Vec::with_capacity(sorted.len());
        let mut outer: Option<(Real, MultiPolygon<Real>)> = None;
        for &distance in &sorted {
            let region = self.dissolved_buffer(features, distance)?;
            if let Some((outer_distance, outer_region)) = outer.take() {
                let ring = difference(&outer_region, &region, &self.tolerance);
                debug!("Band {} has {} parts", outer_distance, ring.0.len());
                bands.push(Band {
                    geometry: ring,
                    distance: outer_distance,
                });
            }
            outer = Some((distance, region));
        }
        if let Some((distance, region)) = outer {
            debug!("Band {} has {} parts", distance, region.0.len());
            bands.push(Band {
                geometry: region,
                distance,
            });
        }
        Ok(bands)
    }

    /// [`build`](Self::build), returned as a feature set whose records carry
    /// each band's distance under the configured field name.
    pub fn build_feature_set(
        &self,
        features: &FeatureSet,
        distances: &[Real],
    ) -> Result<FeatureSet<MultiPolygon<Real>>> {
        let bands = self.build(features, distances)?;
        Ok(self.to_feature_set(bands, features.crs.clone()))
    }

    pub fn to_feature_set(
        &self,
        bands: Vec<Band>,
        crs: CoordinateReference,
    ) -> FeatureSet<MultiPolygon<Real>> {
        let mut set = FeatureSet::new(crs);
        for band in bands {
            let mut record = Record::new();
            record.insert(
                self.options.field_name.clone(),
                AttributeValue::Number(band.distance),
            );
            set.push(band.geometry, record);
        }
        set
    }

    /// Buffer every feature at `distance` (in the configured unit) and
    /// dissolve the results.
    fn dissolved_buffer(&self, features: &FeatureSet, distance: Real) -> Result<MultiPolygon<Real>> {
        let distance = self.options.unit.convert(distance, features.crs.unit);
        let buffered = self.buffer_each(features, distance)?;
        Ok(dissolve_union(&buffered, &self.tolerance))
    }

    #[cfg(not(feature = "parallel"))]
    fn buffer_each(&self, features: &FeatureSet, distance: Real) -> Result<Vec<MultiPolygon<Real>>> {
        features
            .geometries()
            .map(|g| self.buffer_one(g, distance))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn buffer_each(&self, features: &FeatureSet, distance: Real) -> Result<Vec<MultiPolygon<Real>>> {
        features
            .features
            .par_iter()
            .map(|f| self.buffer_one(&f.geometry, distance))
            .collect()
    }

    fn buffer_one(&self, geometry: &Geometry<Real>, distance: Real) -> Result<MultiPolygon<Real>> {
        Ok(buffer(geometry, distance, &self.buffer, &self.tolerance)?)
    }
}


// End of File
