//! Headless aviary binary.
//!
//! Usage:
//!   cargo run -p aviary-app -- [--config aviary.json] [--ticks 600]
//!       [--fire-every 90] [--realtime] [--snapshot-out final.json]
//!
//! Runs the flock and the missile pool without a renderer and logs a summary.
//! `--realtime` paces ticks on the game loop thread instead of running them
//! back to back.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use tracing::{info, warn};

use aviary_app::config::AppConfig;
use aviary_app::game_loop;
use aviary_app::runner::{self, RunSummary};
use aviary_app::state::{self, LoopCommand};
use aviary_core::commands::HostCommand;
use aviary_core::state::SimSnapshot;
use aviary_sim::SimulationEngine;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    fire_every: Option<u64>,
    realtime: bool,
    snapshot_out: Option<PathBuf>,
}

/// Parse a numeric flag value, warning instead of silently dropping a typo.
fn parse_count(flag: &str, raw: &str) -> Option<u64> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(flag, value = raw, %err, "ignoring invalid flag value, using config default");
            None
        }
    }
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                parsed.ticks = parse_count("--ticks", &args[i + 1]);
                i += 2;
            }
            "--fire-every" if i + 1 < args.len() => {
                parsed.fire_every = parse_count("--fire-every", &args[i + 1]);
                i += 2;
            }
            "--snapshot-out" if i + 1 < args.len() => {
                parsed.snapshot_out = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--realtime" => {
                parsed.realtime = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    parsed
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args(&env::args().collect::<Vec<_>>());
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(fire_every) = args.fire_every {
        config.fire_every = fire_every;
    }

    info!(
        seed = config.sim.seed,
        ticks = config.ticks,
        tick_rate = config.tick_rate,
        fire_every = config.fire_every,
        realtime = args.realtime,
        "Starting aviary"
    );

    let (summary, last) = if args.realtime {
        run_realtime(config)?
    } else {
        let mut engine = SimulationEngine::try_new(config.sim.clone()).context("create engine")?;
        runner::run_headless(&mut engine, config.ticks, config.fire_every, config.dt())
    };

    info!(
        ticks = summary.ticks,
        launched = summary.launched,
        expired = summary.expired,
        dropped = summary.dropped,
        "Run finished"
    );
    if let Some(snapshot) = &last {
        info!(
            boids = snapshot.boids.len(),
            mean_speed = snapshot.flock.mean_speed,
            min_altitude = snapshot.flock.min_altitude,
            max_altitude = snapshot.flock.max_altitude,
            "Final flock"
        );
    }

    if let Some(path) = &args.snapshot_out {
        let snapshot = last.ok_or_else(|| anyhow!("no ticks ran, nothing to write"))?;
        let json = serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "Snapshot written");
    }

    Ok(())
}

/// Run on the paced game loop thread, sending fire requests from this thread.
fn run_realtime(config: AppConfig) -> anyhow::Result<(RunSummary, Option<SimSnapshot>)> {
    config.validate().context("invalid config")?;
    let latest = state::shared_snapshot();
    let fire_interval = config.tick_duration() * u32::try_from(config.fire_every).unwrap_or(u32::MAX);
    let fire_every = config.fire_every;

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, latest.clone()).context("spawn game loop")?;

    while !handle.is_finished() {
        if fire_every == 0 {
            std::thread::sleep(std::time::Duration::from_millis(10));
            continue;
        }
        if cmd_tx.send(LoopCommand::Host(HostCommand::FireMissile)).is_err() {
            break;
        }
        std::thread::sleep(fire_interval);
    }
    let _ = cmd_tx.send(LoopCommand::Shutdown);

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    let last = latest
        .lock()
        .map_err(|_| anyhow!("snapshot lock poisoned"))?
        .take();
    Ok((summary, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(flags: &[&str]) -> Vec<String> {
        std::iter::once("aviary")
            .chain(flags.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_reads_flags() {
        let args = parse_args(&argv(&[
            "--config",
            "flock.json",
            "--ticks",
            "120",
            "--fire-every",
            "30",
            "--realtime",
        ]));
        assert_eq!(args.config, Some(PathBuf::from("flock.json")));
        assert_eq!(args.ticks, Some(120));
        assert_eq!(args.fire_every, Some(30));
        assert!(args.realtime);
        assert!(args.snapshot_out.is_none());
    }

    #[test]
    fn test_invalid_count_falls_back_to_config() {
        assert_eq!(parse_count("--ticks", "abc"), None);
        assert_eq!(parse_count("--ticks", "-3"), None);
        assert_eq!(parse_count("--ticks", "42"), Some(42));

        let args = parse_args(&argv(&["--ticks", "abc", "--fire-every", "7"]));
        assert_eq!(args.ticks, None);
        assert_eq!(args.fire_every, Some(7));
    }
}
