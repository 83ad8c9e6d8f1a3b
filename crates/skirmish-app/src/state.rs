//! Application state shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use glam::Vec3;

use skirmish_core::commands::SimCommand;
use skirmish_core::state::SimSnapshot;
use skirmish_sim::combat::Overlap;

/// Messages sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// A hitbox overlap reported by the collision layer.
    Overlap(Overlap),
    /// Player movement from the input layer.
    MovePlayer(Vec3),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared driver state.
///
/// - `mpsc::Sender` sits in a `Mutex` so the state can be shared by reference
/// - `Arc<Mutex<...>>` for the latest snapshot (written by the game loop thread)
pub struct AppState {
    /// `None` until the game loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a message to the game loop. Returns false if it is not running.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(guard) = self.command_tx.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => {
                log::warn!("Game loop not running; dropping {command:?}.");
                false
            }
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn latest(&self) -> Option<SimSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}
