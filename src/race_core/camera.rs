//! Camera - Chase camera planning
//!
//! Derives a camera pose from the player's track position and eases the
//! live camera toward it each tick so the view never snaps.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::race_core::track::Track;

/// Camera placement for one frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Smoothed chase camera following the player around the circuit
#[derive(Debug, Clone)]
pub struct CameraPlanner {
    position: Vec3,
}

impl CameraPlanner {
    /// How far behind the player the camera trails, in progress units
    const TRAIL_OFFSET: f32 = 0.02;
    /// Camera height above the ground plane
    const HEIGHT: f32 = 8.0;
    /// Pull-back along world Z from the trailing track point
    const PULL_BACK: f32 = 8.0;
    /// Per-tick easing factor toward the target position
    const SMOOTHING: f32 = 0.05;

    /// Camera parked at the trailing pose of the start line
    pub fn new(track: &Track) -> Self {
        Self {
            position: Self::target(track, 0.0),
        }
    }

    fn target(track: &Track, progress: f32) -> Vec3 {
        let behind = track.position((progress - Self::TRAIL_OFFSET).rem_euclid(1.0));
        Vec3::new(behind.x, Self::HEIGHT, behind.z + Self::PULL_BACK)
    }

    /// Ease toward the pose trailing the given player progress and
    /// return the resulting placement.
    pub fn update(&mut self, track: &Track, progress: f32) -> CameraPose {
        let target = Self::target(track, progress);
        self.position = self.position.lerp(target, Self::SMOOTHING);
        CameraPose {
            position: self.position,
            look_at: track.position(progress),
        }
    }

    /// Current placement without easing, for frames where the world is
    /// frozen.
    pub fn pose(&self, track: &Track, progress: f32) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: track.position(progress),
        }
    }
}
