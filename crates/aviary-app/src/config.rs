//! Host configuration, loaded from a JSON file.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use aviary_core::config::ConfigError;
use aviary_core::constants::TICK_RATE;
use aviary_sim::SimConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Ticks per second. `dt` is its reciprocal.
    pub tick_rate: u32,
    /// Ticks to run before stopping.
    pub ticks: u64,
    /// Fire a missile every this many ticks. Zero never fires.
    pub fire_every: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate: TICK_RATE,
            ticks: 600,
            fire_every: 90,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read, parse and validate the config at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::EmptyPool { field: "tick_rate" });
        }
        self.sim.validate()
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Wall-clock duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_core::enums::Neighborhood;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert!((config.dt() - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(config.tick_duration().as_nanos(), 1_000_000_000u128 / 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "ticks": 30,
            "sim": { "seed": 9, "flock": { "population": 12, "neighborhood": "Flock" } }
        }"#;
        let config = AppConfig::from_json_str(json).unwrap();
        assert_eq!(config.ticks, 30);
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.sim.seed, 9);
        assert_eq!(config.sim.flock.population, 12);
        assert_eq!(config.sim.flock.neighborhood, Neighborhood::Flock);
        assert_eq!(config.sim.missiles.capacity, 3);
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = AppConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPool { field: "tick_rate" })
        ));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/aviary.json")).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("aviary-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "fire_every": 0, "sim": { "missiles": { "delay": 2.5 } } }"#)
            .unwrap();
        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.fire_every, 0);
        assert_eq!(config.sim.missiles.delay, 2.5);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("aviary-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "sim": { "flock": { "min_speed": 80.0 } } }"#).unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(err.to_string().contains("invalid config"));
    }
}
