//! Race - Core per-frame race simulation
//!
//! Owns every vehicle record, advances the field once per tick, detects
//! lap completion and race finish, and produces the HUD snapshot.

use serde::{Deserialize, Serialize};

use crate::race_core::input::InputSnapshot;
use crate::race_core::vehicle::{Vehicle, VehicleState};

/// One AI starting slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSlot {
    /// Grid position along the track, in progress units
    pub start_progress: f32,
    /// Fixed cruise speed in progress units per tick
    pub cruise_speed: f32,
}

/// Race configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceConfig {
    /// Laps to complete the race
    pub total_laps: u32,
    /// Cosmetic factor from progress-per-tick speed to the HUD readout
    pub speed_display_scale: f32,
    /// Upper bound on a single frame delta, in seconds. A backgrounded
    /// tab can hand us seconds of wall time in one tick.
    pub max_frame_dt: f32,
    /// AI grid, staggered around the circuit
    pub ai_grid: Vec<AiSlot>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            total_laps: 3,
            speed_display_scale: 4000.0,
            max_frame_dt: 0.1,
            ai_grid: vec![
                AiSlot { start_progress: 0.25, cruise_speed: 0.015 },
                AiSlot { start_progress: 0.5, cruise_speed: 0.014 },
                AiSlot { start_progress: 0.75, cruise_speed: 0.016 },
            ],
        }
    }
}

/// Race lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    NotStarted,
    Playing,
    Finished,
}

/// Raised at most once per race, on the tick the player completes the
/// final lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceEvent {
    Finished,
}

/// HUD snapshot, rebuilt fresh each time it is requested
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    /// Cosmetic speed readout
    pub speed: u32,
    /// Current lap, clamped to the race length for display
    pub lap: u32,
    /// Player's 1-based standing
    pub position: u32,
    pub total_racers: u32,
    /// Seconds into the current lap
    pub lap_time: f32,
    /// Fastest completed lap, 0.0 until one exists
    pub best_lap: f32,
}

/// Complete race state. The player is always `vehicles[0]`.
#[derive(Debug, Clone)]
pub struct Race {
    pub config: RaceConfig,
    pub phase: RacePhase,
    pub vehicles: Vec<VehicleState>,
    /// Race clock in seconds, advanced by clamped frame deltas
    pub elapsed: f32,
}

impl Race {
    /// Create a race on the start grid, not yet running
    pub fn new(config: RaceConfig) -> Self {
        let vehicles = Self::grid(&config);
        Self {
            config,
            phase: RacePhase::NotStarted,
            vehicles,
            elapsed: 0.0,
        }
    }

    fn grid(config: &RaceConfig) -> Vec<VehicleState> {
        let mut vehicles = Vec::with_capacity(1 + config.ai_grid.len());
        vehicles.push(VehicleState::player());
        for slot in &config.ai_grid {
            vehicles.push(VehicleState::ai(slot.start_progress, slot.cruise_speed));
        }
        vehicles
    }

    /// Reset the field and the clock, then go green.
    pub fn start(&mut self) {
        self.vehicles = Self::grid(&self.config);
        self.elapsed = 0.0;
        self.phase = RacePhase::Playing;
    }

    pub fn player(&self) -> &VehicleState {
        &self.vehicles[0]
    }

    /// Advance the race by one tick.
    ///
    /// No-op outside `Playing`. `dt` only drives the race clock (lap
    /// timing, AI variance phase); movement uses per-tick increments.
    /// The tick that finishes the race returns the event and leaves the
    /// rest of the field frozen.
    pub fn step(&mut self, dt: f32, input: &InputSnapshot) -> Option<RaceEvent> {
        if self.phase != RacePhase::Playing {
            return None;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };
        self.elapsed += dt;
        let now = self.elapsed;

        Vehicle::update_player(&mut self.vehicles[0], input, now);

        if self.vehicles[0].lap > self.config.total_laps {
            self.phase = RacePhase::Finished;
            return Some(RaceEvent::Finished);
        }

        for (index, ai) in self.vehicles.iter_mut().skip(1).enumerate() {
            Vehicle::update_ai(ai, index, now);
        }

        None
    }

    /// 1-based standing of a vehicle by total-distance metric.
    ///
    /// Stable descending sort, so exact ties keep grid order.
    pub fn standing(&self, index: usize) -> u32 {
        let mut order: Vec<usize> = (0..self.vehicles.len()).collect();
        order.sort_by(|&a, &b| {
            self.vehicles[b]
                .total_distance()
                .total_cmp(&self.vehicles[a].total_distance())
        });
        order
            .iter()
            .position(|&i| i == index)
            .map_or(1, |rank| rank as u32 + 1)
    }

    /// Build the HUD snapshot for the current state.
    pub fn snapshot(&self) -> RaceSnapshot {
        let player = self.player();
        RaceSnapshot {
            phase: self.phase,
            speed: (player.speed * self.config.speed_display_scale).round() as u32,
            lap: player.lap.min(self.config.total_laps),
            position: self.standing(0),
            total_racers: self.vehicles.len() as u32,
            lap_time: self.elapsed - player.lap_start,
            best_lap: player.best_lap.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race_core::vehicle::VehicleRole;

    const TICK: f32 = 1.0 / 60.0;

    fn throttle() -> InputSnapshot {
        InputSnapshot {
            accelerating: true,
            ..Default::default()
        }
    }

    fn run_to_finish(race: &mut Race) -> u32 {
        let mut events = 0;
        for _ in 0..20_000 {
            if race.step(TICK, &throttle()) == Some(RaceEvent::Finished) {
                events += 1;
            }
            if race.phase == RacePhase::Finished {
                break;
            }
        }
        events
    }

    #[test]
    fn steps_are_noops_before_start() {
        let mut race = Race::new(RaceConfig::default());
        let before = race.snapshot();
        assert_eq!(race.step(TICK, &throttle()), None);
        let after = race.snapshot();
        assert_eq!(after.lap, before.lap);
        assert_eq!(after.speed, 0);
        assert_eq!(race.phase, RacePhase::NotStarted);
    }

    #[test]
    fn grid_is_one_player_and_three_ai() {
        let race = Race::new(RaceConfig::default());
        assert_eq!(race.vehicles.len(), 4);
        assert_eq!(race.vehicles[0].role, VehicleRole::Player);
        assert!(race.vehicles[1..].iter().all(|v| v.role == VehicleRole::Ai));
        assert_eq!(race.snapshot().total_racers, 4);
    }

    #[test]
    fn ranking_sorts_total_distance_descending() {
        let mut race = Race::new(RaceConfig::default());
        // Metrics: player 2.3, AI 2.1, 2.5, 1.9 -> player is 2nd.
        race.vehicles[0].lap = 2;
        race.vehicles[0].progress = 0.3;
        race.vehicles[1].lap = 2;
        race.vehicles[1].progress = 0.1;
        race.vehicles[2].lap = 2;
        race.vehicles[2].progress = 0.5;
        race.vehicles[3].lap = 1;
        race.vehicles[3].progress = 0.9;

        assert_eq!(race.standing(0), 2);
        assert_eq!(race.standing(1), 3);
        assert_eq!(race.standing(2), 1);
        assert_eq!(race.standing(3), 4);
        assert_eq!(race.snapshot().position, 2);
    }

    #[test]
    fn just_wrapped_vehicle_ranks_ahead() {
        let mut race = Race::new(RaceConfig::default());
        // Post-wrap metric 2.01 beats 1.98 still on lap 1.
        race.vehicles[0].lap = 2;
        race.vehicles[0].progress = 0.01;
        race.vehicles[1].lap = 1;
        race.vehicles[1].progress = 0.98;
        assert_eq!(race.standing(0), 1);
    }

    #[test]
    fn finish_event_fires_once_and_freezes_the_race() {
        let mut race = Race::new(RaceConfig::default());
        race.start();
        let events = run_to_finish(&mut race);

        assert_eq!(events, 1);
        assert_eq!(race.phase, RacePhase::Finished);

        let progress = race.player().progress;
        let laps = race.player().lap;
        for _ in 0..100 {
            assert_eq!(race.step(TICK, &throttle()), None);
        }
        assert_eq!(race.player().progress, progress);
        assert_eq!(race.player().lap, laps);
    }

    #[test]
    fn finishing_tick_leaves_ai_where_it_was() {
        let mut race = Race::new(RaceConfig::default());
        race.start();

        loop {
            let ai_before: Vec<f32> = race.vehicles[1..].iter().map(|v| v.progress).collect();
            let event = race.step(TICK, &throttle());
            if event == Some(RaceEvent::Finished) {
                let ai_after: Vec<f32> = race.vehicles[1..].iter().map(|v| v.progress).collect();
                assert_eq!(ai_before, ai_after);
                break;
            }
        }
    }

    #[test]
    fn hud_lap_is_clamped_to_race_length() {
        let mut race = Race::new(RaceConfig::default());
        race.start();
        run_to_finish(&mut race);
        assert_eq!(race.player().lap, race.config.total_laps + 1);
        assert_eq!(race.snapshot().lap, race.config.total_laps);
    }

    #[test]
    fn best_lap_never_increases_across_a_race() {
        let mut race = Race::new(RaceConfig::default());
        race.start();

        let mut last_best = f32::INFINITY;
        for _ in 0..20_000 {
            race.step(TICK, &throttle());
            if let Some(best) = race.player().best_lap {
                assert!(best <= last_best);
                last_best = best;
            }
            if race.phase == RacePhase::Finished {
                break;
            }
        }
        assert!(last_best.is_finite());
    }

    #[test]
    fn oversized_and_malformed_deltas_are_clamped() {
        let mut race = Race::new(RaceConfig::default());
        race.start();

        race.step(30.0, &InputSnapshot::default());
        assert!((race.elapsed - race.config.max_frame_dt).abs() < 1e-6);

        race.step(f32::NAN, &InputSnapshot::default());
        race.step(-5.0, &InputSnapshot::default());
        assert!((race.elapsed - race.config.max_frame_dt).abs() < 1e-6);
    }

    #[test]
    fn start_resets_the_field_and_clock() {
        let mut race = Race::new(RaceConfig::default());
        race.start();
        for _ in 0..600 {
            race.step(TICK, &throttle());
        }
        assert!(race.player().progress > 0.0 || race.player().lap > 1);

        race.start();
        assert_eq!(race.phase, RacePhase::Playing);
        assert_eq!(race.elapsed, 0.0);
        assert_eq!(race.player().progress, 0.0);
        assert_eq!(race.player().lap, 1);
        assert_eq!(race.player().speed, 0.0);
        assert_eq!(race.vehicles[1].progress, 0.25);
    }
}
