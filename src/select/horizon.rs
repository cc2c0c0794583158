use geo::{Area, MultiPolygon};
use hexring::{RingTopology, MAX_RING_DISTANCE};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};
use crate::grid::validate_geometry;

/// How many grid rings around a zone count as "covered", scaled to the region.
///
/// The horizon is the smallest ring distance `k` whose disk spans at least
/// `target_fraction` of the region's linear extent (`sqrt(area)`), i.e.
/// `(2k + 1) * spacing >= target_fraction * sqrt(area)`, clamped to
/// `1..=max_horizon`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonPolicy {
    pub target_fraction: f64,
    pub max_horizon: u32,
}

impl Default for HorizonPolicy {
    /// At H3 resolution 9 a city-sized region (~50 km across) gets 2 rings,
    /// a single district gets 1.
    fn default() -> Self {
        Self { target_fraction: 0.03, max_horizon: 10 }
    }
}

impl HorizonPolicy {
    pub fn validate(&self) -> Result<()> {
        if !(self.target_fraction.is_finite() && self.target_fraction > 0.0) {
            return Err(ZoneError::invalid_parameter("target_fraction", self.target_fraction, "must be positive"));
        }
        if self.max_horizon == 0 || self.max_horizon > MAX_RING_DISTANCE {
            return Err(ZoneError::invalid_parameter("max_horizon", self.max_horizon,
                format!("must be within 1..={MAX_RING_DISTANCE}")));
        }
        Ok(())
    }

    /// Ring distance for a region of `area_m2` on a grid with center spacing `spacing_m`.
    pub fn horizon_for_area(&self, area_m2: f64, spacing_m: f64) -> u32 {
        let extent = self.target_fraction * area_m2.max(0.0).sqrt();
        let rings = ((extent / spacing_m - 1.0) / 2.0).ceil();
        // NaN (degenerate region) falls through to the minimum.
        rings.max(1.0).min(self.max_horizon as f64) as u32
    }
}

/// Neighbor horizon (ring distance >= 1) suited to `region`'s spatial extent.
pub fn select_horizon(region: &MultiPolygon<f64>, topology: &impl RingTopology, policy: &HorizonPolicy) -> Result<u32> {
    policy.validate()?;
    validate_geometry("region", region)?;

    let spacing = topology.center_spacing_m();
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(ZoneError::invalid_parameter("spacing", spacing, "grid spacing must be positive"));
    }
    Ok(policy.horizon_for_area(region.unsigned_area(), spacing))
}
