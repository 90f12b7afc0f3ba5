//! Simulation - Game server and tick glue
//!
//! Owns the race, the chase camera and tick timing, and provides the
//! interface the Tauri commands call into. One tick runs per rendered
//! frame, driven by the frontend's frame callback.

use std::time::Instant;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::race_core::camera::{CameraPlanner, CameraPose};
use crate::race_core::input::InputSnapshot;
use crate::race_core::race::{Race, RaceConfig, RaceEvent, RacePhase, RaceSnapshot};
use crate::race_core::track::Track;

/// Everything the frontend needs from one simulation tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOutput {
    pub snapshot: RaceSnapshot,
    pub camera: CameraPose,
    /// True exactly once per race, on the tick the player finishes
    pub finished: bool,
}

/// Server statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStats {
    pub avg_tick_time_ms: f32,
    pub vehicle_count: u32,
    pub phase: RacePhase,
}

/// Main game server
pub struct GameServer {
    track: Track,
    race: Race,
    camera: CameraPlanner,
    /// Last tick timestamp
    last_tick: Instant,
    /// Accumulated tick times for averaging
    tick_times: Vec<f32>,
}

impl GameServer {
    /// Create a new game server with the default circuit and grid
    pub fn new() -> Self {
        let track = Track::default();
        Self {
            camera: CameraPlanner::new(&track),
            race: Race::new(RaceConfig::default()),
            track,
            last_tick: Instant::now(),
            tick_times: Vec::with_capacity(60),
        }
    }

    /// Reset all vehicle and timer state and go green
    pub fn start_race(&mut self) {
        self.race.start();
        self.camera = CameraPlanner::new(&self.track);
        self.last_tick = Instant::now();
    }

    /// Tear the race down to the start grid
    pub fn restart_race(&mut self) {
        self.race = Race::new(self.race.config.clone());
        self.camera = CameraPlanner::new(&self.track);
        self.tick_times.clear();
    }

    /// Run one simulation tick against the given input snapshot
    pub fn tick(&mut self, input: InputSnapshot) -> TickOutput {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let tick_start = Instant::now();

        let event = self.race.step(dt, &input);
        let finished = event == Some(RaceEvent::Finished);
        if finished {
            log::info!(
                "Race finished: position {} of {}, best lap {:.2}s",
                self.race.standing(0),
                self.race.vehicles.len(),
                self.race.player().best_lap.unwrap_or(0.0),
            );
        }

        // The camera only eases while the world moves; the finishing
        // tick freezes it with everything else.
        let progress = self.race.player().progress;
        let camera = if self.race.phase == RacePhase::Playing {
            self.camera.update(&self.track, progress)
        } else {
            self.camera.pose(&self.track, progress)
        };

        let tick_time = tick_start.elapsed().as_secs_f32() * 1000.0;
        self.tick_times.push(tick_time);
        if self.tick_times.len() > 60 {
            self.tick_times.remove(0);
        }

        TickOutput {
            snapshot: self.race.snapshot(),
            camera,
            finished,
        }
    }

    /// Current race snapshot without advancing the simulation
    pub fn snapshot(&self) -> RaceSnapshot {
        self.race.snapshot()
    }

    /// Current race phase
    pub fn phase(&self) -> RacePhase {
        self.race.phase
    }

    /// Closed polyline of the racing line for the renderer
    pub fn track_polyline(&self, segments: u32) -> Vec<Vec3> {
        self.track.sample_polyline(segments)
    }

    /// Server statistics
    pub fn stats(&self) -> ServerStats {
        let avg_tick_time = if self.tick_times.is_empty() {
            0.0
        } else {
            self.tick_times.iter().sum::<f32>() / self.tick_times.len() as f32
        };

        ServerStats {
            avg_tick_time_ms: avg_tick_time,
            vehicle_count: self.race.vehicles.len() as u32,
            phase: self.race.phase,
        }
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}
