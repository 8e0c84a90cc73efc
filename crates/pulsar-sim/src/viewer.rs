//! Viewer state passed in by the host every tick

use glam::DVec3;
use pulsar_core::coordinates::CartesianPosition;
use serde::{Deserialize, Serialize};

/// Viewer position and gaze, in world units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerState {
    pub position: DVec3,
    /// Gaze direction; need not be unit length
    pub look_direction: DVec3,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self { position: DVec3::ZERO, look_direction: DVec3::X }
    }
}

impl ViewerState {
    pub fn new(position: DVec3, look_direction: DVec3) -> Self {
        Self { position, look_direction: look_direction.normalize_or_zero() }
    }

    /// Viewer at `position` gazing at `target`
    pub fn looking_at(position: DVec3, target: DVec3) -> Self {
        Self::new(position, target - position)
    }

    pub fn distance_to(&self, point: &CartesianPosition) -> f64 {
        self.position.distance(to_dvec3(point))
    }

    /// Distance along the gaze ray to the first hit on a sphere, if any
    pub fn ray_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let dir = self.look_direction.normalize_or_zero();
        if dir == DVec3::ZERO || radius <= 0.0 {
            return None;
        }

        let oc = self.position - center;
        let b = oc.dot(dir);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let far = -b + root;
        if far < 0.0 {
            // Sphere is behind the viewer
            return None;
        }
        Some((-b - root).max(0.0))
    }
}

pub fn to_dvec3(p: &CartesianPosition) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_in_front() {
        let viewer = ViewerState::new(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0));
        let t = viewer.ray_sphere(DVec3::new(10.0, 0.0, 0.0), 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_miss_and_behind() {
        let viewer = ViewerState::new(DVec3::ZERO, DVec3::X);
        assert!(viewer.ray_sphere(DVec3::new(10.0, 5.0, 0.0), 1.0).is_none());
        assert!(viewer.ray_sphere(DVec3::new(-10.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_inside_sphere() {
        let viewer = ViewerState::new(DVec3::ZERO, DVec3::Y);
        assert_eq!(viewer.ray_sphere(DVec3::ZERO, 2.0), Some(0.0));
    }

    #[test]
    fn test_looking_at() {
        let viewer = ViewerState::looking_at(DVec3::new(1.0, 1.0, 1.0), DVec3::new(1.0, 1.0, 5.0));
        assert_eq!(viewer.look_direction, DVec3::Z);
        assert!((viewer.distance_to(&CartesianPosition::new(1.0, 4.0, 5.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_raw_direction_is_normalized() {
        let viewer = ViewerState { position: DVec3::ZERO, look_direction: DVec3::new(1000.0, 0.0, 0.0) };
        let t = viewer.ray_sphere(DVec3::new(10.0, 0.0, 0.0), 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-9);

        // 15 degrees off the ray at 128 units
        let off = DVec3::new(128.0 * 15f64.to_radians().cos(), 128.0 * 15f64.to_radians().sin(), 0.0);
        assert!(viewer.ray_sphere(off, 1.0).is_none());
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let viewer = ViewerState::new(DVec3::ZERO, DVec3::ZERO);
        assert!(viewer.ray_sphere(DVec3::ZERO, 1.0).is_none());
    }
}
