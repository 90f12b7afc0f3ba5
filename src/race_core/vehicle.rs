//! Vehicle - Individual racer state and per-tick movement
//!
//! One record shape covers the player and the AI cars; the role tag
//! tells the simulation and the renderer which rules apply. The
//! simulation mutates these records once per tick.

use serde::{Deserialize, Serialize};

use crate::race_core::input::InputSnapshot;

/// Who is driving this vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleRole {
    Player,
    Ai,
}

/// Complete state for a single vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleState {
    pub role: VehicleRole,
    /// Position along the current lap, kept in [0, 1)
    pub progress: f32,
    /// Current lap, starts at 1
    pub lap: u32,
    /// Scalar speed in progress units per tick.
    /// For AI this is the fixed cruise speed set at spawn.
    pub speed: f32,
    /// Race-clock time the current lap started at (player only)
    pub lap_start: f32,
    /// Fastest completed lap so far (player only)
    pub best_lap: Option<f32>,
}

impl VehicleState {
    /// Player vehicle on the start line
    pub fn player() -> Self {
        Self {
            role: VehicleRole::Player,
            progress: 0.0,
            lap: 1,
            speed: 0.0,
            lap_start: 0.0,
            best_lap: None,
        }
    }

    /// AI vehicle staggered onto the grid with a fixed cruise speed
    pub fn ai(start_progress: f32, cruise_speed: f32) -> Self {
        Self {
            role: VehicleRole::Ai,
            progress: start_progress,
            lap: 1,
            speed: cruise_speed,
            lap_start: 0.0,
            best_lap: None,
        }
    }

    /// Total-distance metric used for ranking. Comparison only, never
    /// persisted; monotonically increasing over a race.
    pub fn total_distance(&self) -> f32 {
        self.lap as f32 + self.progress
    }
}

/// Vehicle movement rules
pub struct Vehicle;

impl Vehicle {
    /// Tuning constants. These are per-tick increments assuming the
    /// nominal 60 Hz frame cadence, not scaled by wall time.
    pub const MAX_SPEED: f32 = 0.025;
    pub const ACCELERATION: f32 = 0.0008;
    pub const BRAKE_FORCE: f32 = 0.001;
    pub const FRICTION: f32 = 0.0003;
    pub const STEER_DELTA: f32 = 0.003;
    const STEER_SPEED_PENALTY: f32 = 0.9;
    const AI_VARIANCE_AMPLITUDE: f32 = 0.002;

    /// Advance the player one tick.
    ///
    /// `now` is the race clock in seconds, used for lap timing.
    /// Returns how many lap lines were crossed this tick.
    pub fn update_player(state: &mut VehicleState, input: &InputSnapshot, now: f32) -> u32 {
        if input.accelerating {
            state.speed = (state.speed + Self::ACCELERATION).min(Self::MAX_SPEED);
        } else if input.braking {
            state.speed = (state.speed - Self::BRAKE_FORCE).max(0.0);
        } else {
            state.speed = (state.speed - Self::FRICTION).max(0.0);
        }

        // Steering scrubs off speed and drags the car along the track's
        // natural curvature; opposite inputs cancel the drag but the
        // scrub still applies.
        let effective_speed = if input.steering() {
            state.speed * Self::STEER_SPEED_PENALTY
        } else {
            state.speed
        };
        let mut steer = 0.0;
        if input.turning_left {
            steer -= Self::STEER_DELTA;
        }
        if input.turning_right {
            steer += Self::STEER_DELTA;
        }

        state.progress += effective_speed + steer;
        Self::wrap_player_laps(state, now)
    }

    /// Advance one AI vehicle for one tick.
    ///
    /// Cruise speed plus a pseudo-periodic perturbation keyed off the
    /// race clock and grid index, so the field spreads and regroups.
    pub fn update_ai(state: &mut VehicleState, index: usize, elapsed: f32) {
        let variance = (elapsed + index as f32).sin() * Self::AI_VARIANCE_AMPLITUDE;
        state.progress += state.speed + variance;
        while state.progress >= 1.0 {
            state.progress -= 1.0;
            state.lap += 1;
        }
        state.progress = state.progress.max(0.0);
    }

    /// Fold lap crossings back into [0, 1), keeping the overshoot, and
    /// record lap timing against the race clock.
    fn wrap_player_laps(state: &mut VehicleState, now: f32) -> u32 {
        let mut crossed = 0;
        while state.progress >= 1.0 {
            state.progress -= 1.0;
            state.lap += 1;
            crossed += 1;

            let lap_time = now - state.lap_start;
            state.best_lap = Some(match state.best_lap {
                Some(best) => best.min(lap_time),
                None => lap_time,
            });
            state.lap_start = now;
        }

        // Steer drag can nudge a nearly stopped car backwards over the
        // line; un-cross it rather than granting a free lap.
        if state.progress < 0.0 {
            if state.lap > 1 {
                state.progress += 1.0;
                state.lap -= 1;
            } else {
                state.progress = 0.0;
            }
        }

        crossed
    }
}
