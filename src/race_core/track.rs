//! Track - Closed circuit path model
//!
//! The circuit is one parametric curve from normalized progress to a
//! world position. Any polyline the renderer needs is sampled from it
//! on demand; no waypoint list is authoritative.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Figure-eight style closed circuit, parameterized by progress in [0, 1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Track {
    /// Track radius in world units
    pub radius: f32,
}

impl Default for Track {
    fn default() -> Self {
        Self { radius: 50.0 }
    }
}

impl Track {
    /// Forward-difference step for the tangent
    const TANGENT_DELTA: f32 = 0.001;
    /// Height of the racing line above the ground plane
    const RIDE_HEIGHT: f32 = 0.3;

    /// World position on the racing line at the given progress.
    ///
    /// Periodic across the wrap boundary: `position(0) == position(1)`.
    pub fn position(&self, progress: f32) -> Vec3 {
        let angle = progress * std::f32::consts::TAU;
        let x = angle.sin() * self.radius;
        let z = (angle * 2.0).sin() * self.radius * 0.3 + angle.cos() * self.radius;
        Vec3::new(x, Self::RIDE_HEIGHT, z)
    }

    /// Unit tangent at the given progress, by forward difference.
    ///
    /// The curve never yields coincident samples, but a degenerate
    /// difference falls back to +Z rather than producing NaNs.
    pub fn tangent(&self, progress: f32) -> Vec3 {
        let p1 = self.position(progress);
        let p2 = self.position((progress + Self::TANGENT_DELTA).rem_euclid(1.0));
        (p2 - p1).try_normalize().unwrap_or(Vec3::Z)
    }

    /// Sample the racing line into a closed polyline for rendering.
    ///
    /// Returns `segments + 1` points with the last equal to the first.
    pub fn sample_polyline(&self, segments: u32) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.position(i as f32 / segments as f32))
            .collect()
    }
}
