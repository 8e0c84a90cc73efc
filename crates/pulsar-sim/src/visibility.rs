//! Apparent-size correction and level of detail
//!
//! Beyond the cutoff distance a body would shrink below the angle it spans
//! at the cutoff. The correction scales it back up so the apparent angular
//! size stays at that minimum. Nothing here holds per-body state.

use pulsar_core::constants::{CUTOFF_DISTANCE, JET_FADE_DISTANCE, PULSAR_RADIUS};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Distance beyond which apparent size is held constant (world units)
    pub cutoff_distance: f64,
    /// Radius of a body at unit scale (world units)
    pub min_radius: f64,
    /// Distance at which the jet starts to shorten (world units)
    pub jet_fade_distance: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            cutoff_distance: CUTOFF_DISTANCE,
            min_radius: PULSAR_RADIUS,
            jet_fade_distance: JET_FADE_DISTANCE,
        }
    }
}

/// Level of detail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lod {
    /// Within the cutoff: full detail
    Resolved,
    /// Beyond the cutoff: point-like
    Unresolved,
}

/// Per-body result of a policy evaluation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    pub scale: f64,
    pub lod: Lod,
    pub jet_scale: f64,
}

impl Visibility {
    pub const IDENTITY: Self = Self { scale: 1.0, lod: Lod::Resolved, jet_scale: 1.0 };
}

#[derive(Clone, Debug)]
pub struct VisibilityPolicy {
    config: VisibilityConfig,
    min_angle: f64,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self::new(VisibilityConfig::default())
    }
}

impl VisibilityPolicy {
    pub fn new(config: VisibilityConfig) -> Self {
        let min_angle = (config.min_radius / config.cutoff_distance).atan();
        Self { config, min_angle }
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Angle subtended by a unit-scale body at the cutoff [rad]
    pub fn min_angle(&self) -> f64 {
        self.min_angle
    }

    /// Angle subtended by a unit-scale body at distance `d` [rad]
    pub fn angular_size(&self, distance: f64) -> f64 {
        (self.config.min_radius / distance).atan()
    }

    /// `min_angle / angle`: above 1 only beyond the cutoff
    pub fn angular_ratio(&self, distance: f64) -> f64 {
        if distance <= 0.0 || !distance.is_finite() {
            return 1.0;
        }
        self.min_angle / self.angular_size(distance)
    }

    /// Scale multiplier for the rendered body
    pub fn scale_correction(&self, distance: f64) -> f64 {
        let ratio = self.angular_ratio(distance);
        if ratio > 1.0 {
            ratio
        } else {
            1.0
        }
    }

    pub fn lod(&self, distance: f64) -> Lod {
        if distance <= self.config.cutoff_distance {
            Lod::Resolved
        } else {
            Lod::Unresolved
        }
    }

    /// Jet length factor, shrinking as 1/d past the fade distance
    pub fn jet_scale(&self, distance: f64) -> f64 {
        if distance <= 0.0 {
            return 1.0;
        }
        (self.config.jet_fade_distance / distance).clamp(0.0, 1.0)
    }

    pub fn evaluate(&self, distance: f64) -> Visibility {
        if distance <= 0.0 {
            return Visibility::IDENTITY;
        }
        Visibility {
            scale: self.scale_correction(distance),
            lod: self.lod(distance),
            jet_scale: self.jet_scale(distance),
        }
    }
}
