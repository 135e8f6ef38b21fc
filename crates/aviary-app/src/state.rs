//! State shared between the host thread and the game loop thread.

use std::sync::{Arc, Mutex};

use aviary_core::commands::HostCommand;
use aviary_core::state::SimSnapshot;

/// Commands sent from the host thread to the game loop thread.
#[derive(Debug, Clone)]
pub enum LoopCommand {
    /// A host command to forward to the simulation engine.
    Host(HostCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after every tick and polled by
/// the host.
pub type SharedSnapshot = Arc<Mutex<Option<SimSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_snapshot_starts_empty() {
        let shared = shared_snapshot();
        assert!(shared.lock().unwrap().is_none());

        *shared.lock().unwrap() = Some(SimSnapshot::default());
        assert!(shared.lock().unwrap().is_some());
    }
}
