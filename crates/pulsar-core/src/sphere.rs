//! Celestial reference sphere: parallels, meridians and the equator

use serde::{Deserialize, Serialize};

use crate::constants::{SPHERE_DIVISIONS, SPHERE_RADIUS};
use crate::coordinates::{celestial_to_cartesian, CartesianPosition};

/// Configuration for the reference sphere
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Sphere radius (world units)
    pub radius: f64,
    /// Sweep steps per line
    pub divisions: u32,
    /// Declinations of the parallels (degrees)
    pub parallels: Vec<f64>,
    /// Right ascensions of the meridians (degrees)
    pub meridians: Vec<f64>,
}

impl Default for SphereConfig {
    fn default() -> Self {
        let parallels = (-9..=9)
            .filter(|i| *i != 0)
            .map(|i| i as f64 * 10.0)
            .collect();
        let meridians = (-9..=9).map(|i| i as f64 * 10.0).collect();

        Self {
            radius: SPHERE_RADIUS,
            divisions: SPHERE_DIVISIONS,
            parallels,
            meridians,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridLineKind {
    Parallel,
    Meridian,
    Equator,
}

/// One polyline of the grid
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridLine {
    pub kind: GridLineKind,
    /// Fixed coordinate of the line (degrees)
    pub angle_deg: f64,
    pub points: Vec<CartesianPosition>,
}

pub struct CelestialSphere {
    config: SphereConfig,
}

impl CelestialSphere {
    pub fn new(config: SphereConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(SphereConfig::default())
    }

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    fn sweep(&self) -> impl Iterator<Item = f64> {
        let divisions = self.config.divisions.max(1);
        let step = 360.0 / divisions as f64;
        (0..=divisions).map(move |i| i as f64 * step)
    }

    /// Points at fixed declination, sweeping RA from 0° to 360°
    pub fn parallel(&self, declination_deg: f64) -> Vec<CartesianPosition> {
        self.sweep()
            .map(|ra| celestial_to_cartesian(ra, declination_deg, self.config.radius))
            .collect()
    }

    /// Points at fixed RA, sweeping declination from 0° to 360°
    pub fn meridian(&self, right_ascension_deg: f64) -> Vec<CartesianPosition> {
        self.sweep()
            .map(|dec| celestial_to_cartesian(right_ascension_deg, dec, self.config.radius))
            .collect()
    }

    pub fn equator(&self) -> Vec<CartesianPosition> {
        self.parallel(0.0)
    }

    /// Every configured line, equator last
    pub fn lines(&self) -> Vec<GridLine> {
        let parallels = self.config.parallels.iter().map(|&dec| GridLine {
            kind: GridLineKind::Parallel,
            angle_deg: dec,
            points: self.parallel(dec),
        });
        let meridians = self.config.meridians.iter().map(|&ra| GridLine {
            kind: GridLineKind::Meridian,
            angle_deg: ra,
            points: self.meridian(ra),
        });

        parallels
            .chain(meridians)
            .chain(std::iter::once(GridLine {
                kind: GridLineKind::Equator,
                angle_deg: 0.0,
                points: self.equator(),
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = SphereConfig::default();
        assert_eq!(config.parallels.len(), 18);
        assert!(!config.parallels.contains(&0.0));
        assert_eq!(config.meridians.len(), 19);
        assert_eq!(config.meridians.first(), Some(&-90.0));
        assert_eq!(config.meridians.last(), Some(&90.0));
    }

    #[test]
    fn test_parallel_is_closed_circle() {
        let sphere = CelestialSphere::with_defaults();
        let points = sphere.parallel(30.0);
        assert_eq!(points.len(), 65);

        let first = points[0];
        let last = points[points.len() - 1];
        assert!(first.distance_to(&last) < 1e-9);

        let expected_z = 1024.0 * 30.0_f64.to_radians().sin();
        for p in &points {
            assert!((p.z - expected_z).abs() < 1e-9);
            assert!((p.magnitude() - 1024.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lines_count() {
        let sphere = CelestialSphere::with_defaults();
        let lines = sphere.lines();
        assert_eq!(lines.len(), 18 + 19 + 1);
        assert_eq!(lines.last().map(|l| l.kind), Some(GridLineKind::Equator));
    }
}
