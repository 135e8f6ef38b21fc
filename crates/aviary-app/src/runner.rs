//! Batch runner: ticks the engine as fast as possible, firing on a schedule.

use serde::Serialize;
use tracing::debug;

use aviary_core::commands::HostCommand;
use aviary_core::events::SimEvent;
use aviary_core::state::SimSnapshot;
use aviary_sim::SimulationEngine;

/// What happened over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub launched: u32,
    pub expired: u32,
    pub dropped: u32,
}

impl RunSummary {
    /// Fold one tick's snapshot into the totals.
    pub fn record(&mut self, snapshot: &SimSnapshot) {
        self.ticks += 1;
        for event in &snapshot.events {
            match event {
                SimEvent::MissileLaunched { .. } => self.launched += 1,
                SimEvent::MissileExpired { .. } => self.expired += 1,
                SimEvent::LaunchDropped => self.dropped += 1,
            }
        }
    }
}

/// Whether a fire request is due on tick `tick` (zero-based).
pub fn fire_due(tick: u64, fire_every: u64) -> bool {
    fire_every > 0 && tick % fire_every == 0
}

/// Run `ticks` ticks of `dt` seconds. Returns the totals and the final
/// snapshot, if any tick ran.
pub fn run_headless(
    engine: &mut SimulationEngine,
    ticks: u64,
    fire_every: u64,
    dt: f32,
) -> (RunSummary, Option<SimSnapshot>) {
    let mut summary = RunSummary::default();
    let mut last = None;
    for tick in 0..ticks {
        if fire_due(tick, fire_every) {
            engine.queue_command(HostCommand::FireMissile);
        }
        let snapshot = engine.tick(dt);
        summary.record(&snapshot);
        if !snapshot.events.is_empty() {
            debug!(tick = snapshot.time.tick, events = snapshot.events.len(), "tick events");
        }
        last = Some(snapshot);
    }
    (summary, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviary_sim::SimConfig;

    #[test]
    fn test_fire_schedule() {
        assert!(fire_due(0, 10));
        assert!(!fire_due(5, 10));
        assert!(fire_due(20, 10));
        assert!(!fire_due(0, 0));
    }

    #[test]
    fn test_zero_ticks() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let (summary, last) = run_headless(&mut engine, 0, 1, 1.0 / 60.0);
        assert_eq!(summary, RunSummary::default());
        assert!(last.is_none());
    }

    #[test]
    fn test_counts_launches_drops_and_expiries() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        // One request per unit tick. Slots live for 5 s, so the pool fills on
        // tick 3 and the fourth request is dropped.
        let (summary, last) = run_headless(&mut engine, 4, 1, 1.0);
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.launched, 3);
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.expired, 0);
        assert_eq!(last.unwrap().time.tick, 4);

        let (more, _) = run_headless(&mut engine, 4, 0, 1.0);
        assert_eq!(more.expired, 3);
    }
}
