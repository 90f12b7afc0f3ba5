//! Neon Circuit - Tauri Backend
//!
//! Runs the race simulation and exposes commands the frontend calls
//! once per rendered frame and on menu transitions.

mod race_core;

use race_core::input::InputSnapshot;
use race_core::race::{RacePhase, RaceSnapshot};
use race_core::simulation::{GameServer, ServerStats, TickOutput};
use std::sync::Mutex;
use tauri::State;

/// Reset all vehicle and timer state and start the race
#[tauri::command]
fn start_race(server: State<'_, Mutex<GameServer>>) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.start_race();
    log::info!("Race started");
    Ok(())
}

/// Return to the start screen state
#[tauri::command]
fn restart_race(server: State<'_, Mutex<GameServer>>) -> Result<(), String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    server.restart_race();
    log::info!("Race restarted");
    Ok(())
}

/// Perform one simulation tick for the given input snapshot and return
/// the HUD snapshot, camera pose and finish flag
#[tauri::command]
fn tick(server: State<'_, Mutex<GameServer>>, input: InputSnapshot) -> Result<TickOutput, String> {
    let mut server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.tick(input))
}

/// Get the current race snapshot without advancing the simulation
#[tauri::command]
fn get_snapshot(server: State<'_, Mutex<GameServer>>) -> Result<RaceSnapshot, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.snapshot())
}

/// Get the current race phase
#[tauri::command]
fn get_phase(server: State<'_, Mutex<GameServer>>) -> Result<RacePhase, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.phase())
}

/// Sample the racing line for track mesh construction
#[tauri::command]
fn get_track_polyline(
    server: State<'_, Mutex<GameServer>>,
    segments: Option<u32>,
) -> Result<Vec<glam::Vec3>, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.track_polyline(segments.unwrap_or(200)))
}

/// Get server statistics
#[tauri::command]
fn get_stats(server: State<'_, Mutex<GameServer>>) -> Result<ServerStats, String> {
    let server = server.lock().map_err(|e| e.to_string())?;
    Ok(server.stats())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .manage(Mutex::new(GameServer::new()))
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            log::info!("Neon Circuit game server initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            start_race,
            restart_race,
            tick,
            get_snapshot,
            get_phase,
            get_track_polyline,
            get_stats,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
