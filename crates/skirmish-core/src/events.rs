//! Events published on the bus and presentation cues emitted each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::ActorKind;
use crate::types::ActorHandle;

/// Gameplay notifications consumed by gating collaborators (gates, spawn zones).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A dead actor was reclaimed by the registry sweep.
    ActorSlain { actor: ActorHandle, kind: ActorKind },
    /// The encounter was reset: spawn zones re-arm, key gates re-lock.
    EncounterReset,
}

/// Fire-and-forget hooks for animation, audio, and UI collaborators.
///
/// Cues are collected during a tick and handed out with the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Cue {
    /// Enemy spotted the player and roared.
    Roar { actor: ActorHandle },
    /// Enemy started walking toward the player.
    Pursue { actor: ActorHandle },
    /// Enemy stopped walking.
    StopMoving { actor: ActorHandle },
    /// Enemy began an attack swing.
    AttackStarted { actor: ActorHandle },
    /// Actor died.
    Death { actor: ActorHandle, kind: ActorKind },
    /// Actor was brought back to life.
    Respawned { actor: ActorHandle, kind: ActorKind },
    /// A loot instance was dropped.
    LootDropped { position: Vec3 },
    /// A particle effect started playing.
    ParticlePlayed { position: Vec3 },
    /// The player was struck.
    PlayerHit { damage: f32, remaining: f32 },
    /// The player died.
    PlayerDied,
    /// The player respawned.
    PlayerRespawned,
    /// A gate changed lock state.
    GateChanged { gate: u32, locked: bool },
}
