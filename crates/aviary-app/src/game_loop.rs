//! Game loop thread: runs the simulation engine at the configured tick rate.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive over an `mpsc` channel; the latest snapshot is
//! stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use aviary_sim::SimulationEngine;

use crate::config::AppConfig;
use crate::runner::RunSummary;
use crate::state::{LoopCommand, SharedSnapshot};

/// Spawns the game loop in a new thread.
///
/// The loop stops after `config.ticks` ticks, on `Shutdown`, or when every
/// sender is dropped. Joining the handle yields the run totals.
pub fn spawn_game_loop(
    config: AppConfig,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("aviary-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

fn run_game_loop(
    config: AppConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> RunSummary {
    let dt = config.dt();
    let tick_duration = config.tick_duration();
    let mut engine = SimulationEngine::new(config.sim);
    let mut summary = RunSummary::default();
    let mut next_tick_time = Instant::now();

    info!(tick_rate = config.tick_rate, ticks = config.ticks, "game loop started");

    while summary.ticks < config.ticks {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Host(command)) => engine.queue_command(command),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(ticks = summary.ticks, "game loop stopped");
                    return summary;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine handles pause internally)
        let snapshot = engine.tick(dt);
        summary.record(&snapshot);

        // 3. Store latest snapshot for polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) => warn!("snapshot lock poisoned"),
        }

        // 4. Sleep until next tick
        next_tick_time = next_deadline(next_tick_time, tick_duration, Instant::now());
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        }
    }

    info!(ticks = summary.ticks, "game loop finished");
    summary
}

/// Next tick deadline. Falling more than two ticks behind resets the
/// schedule to `now` instead of catching up.
fn next_deadline(previous: Instant, tick_duration: Duration, now: Instant) -> Instant {
    let next = previous + tick_duration;
    if now > next && now - next > tick_duration * 2 {
        now
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_core::commands::HostCommand;
    use aviary_core::enums::SimPhase;

    use crate::state::shared_snapshot;

    fn fast_config(ticks: u64) -> AppConfig {
        let mut config = AppConfig {
            tick_rate: 1000,
            ticks,
            ..Default::default()
        };
        config.sim.flock.population = 10;
        config
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Host(HostCommand::FireMissile)).unwrap();
        tx.send(LoopCommand::Host(HostCommand::Pause)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Host(HostCommand::FireMissile)
        ));
        assert!(matches!(commands[1], LoopCommand::Host(HostCommand::Pause)));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_runs_configured_ticks() {
        let latest = shared_snapshot();
        let (_tx, handle) = spawn_game_loop(fast_config(20), latest.clone()).unwrap();
        let summary = handle.join().unwrap();

        assert_eq!(summary.ticks, 20);
        let snapshot = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snapshot.time.tick, 20);
        assert_eq!(snapshot.boids.len(), 10);
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let latest = shared_snapshot();
        let (tx, handle) = spawn_game_loop(fast_config(u64::MAX), latest).unwrap();
        tx.send(LoopCommand::Host(HostCommand::Pause)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();
        let summary = handle.join().unwrap();
        assert!(summary.ticks < u64::MAX);
    }

    #[test]
    fn test_dropped_sender_stops_loop() {
        let latest = shared_snapshot();
        let (tx, handle) = spawn_game_loop(fast_config(u64::MAX), latest).unwrap();
        drop(tx);
        let summary = handle.join().unwrap();
        assert!(summary.ticks < u64::MAX);
    }

    #[test]
    fn test_paused_loop_keeps_time_frozen() {
        let latest = shared_snapshot();
        let (tx, handle) = spawn_game_loop(fast_config(u64::MAX), latest.clone()).unwrap();
        tx.send(LoopCommand::Host(HostCommand::Pause)).unwrap();

        // Wait for a paused snapshot, then check the clock stays put.
        let frozen_at = loop {
            let paused = latest
                .lock()
                .unwrap()
                .as_ref()
                .filter(|snapshot| snapshot.phase == SimPhase::Paused)
                .map(|snapshot| snapshot.time.tick);
            if let Some(tick) = paused {
                break tick;
            }
            std::thread::sleep(Duration::from_millis(1));
        };
        std::thread::sleep(Duration::from_millis(20));
        let now = latest.lock().unwrap().as_ref().map(|snapshot| snapshot.time.tick);
        assert_eq!(now, Some(frozen_at));

        tx.send(LoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_deadline_resets_when_far_behind() {
        let tick = Duration::from_millis(10);
        let start = Instant::now();

        assert_eq!(next_deadline(start, tick, start), start + tick);

        let late = start + Duration::from_millis(100);
        assert_eq!(next_deadline(start, tick, late), late);
    }

    #[test]
    fn test_snapshot_serialization_fast() {
        let mut engine = SimulationEngine::new(AppConfig::default().sim);
        for _ in 0..50 {
            engine.tick(1.0 / 60.0);
        }

        let snapshot = engine.tick(1.0 / 60.0);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(10),
            "Snapshot serialization took {:?}",
            elapsed
        );
        assert!(json.contains("\"boids\""));
    }
}
