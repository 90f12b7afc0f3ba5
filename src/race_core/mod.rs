//! Race Core Module
//!
//! Runs the race simulation in Rust: path model, vehicles, standings,
//! lap timing and camera planning. Communicates with the JS frontend
//! via Tauri commands, once per rendered frame.

pub mod camera;
pub mod input;
pub mod race;
pub mod simulation;
pub mod track;
pub mod vehicle;

pub use camera::{CameraPlanner, CameraPose};
pub use input::InputSnapshot;
pub use race::{Race, RaceConfig, RacePhase, RaceSnapshot};
pub use simulation::{GameServer, TickOutput};
pub use track::Track;
pub use vehicle::{Vehicle, VehicleRole, VehicleState};
