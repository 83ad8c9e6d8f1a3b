//! Simulation snapshot: the complete visible state handed to the driver each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{ActorKind, AiState};
use crate::events::Cue;
use crate::types::{ActorHandle, SimTime};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    /// Active actor slots.
    pub live_count: usize,
    /// Total actor slots, active or not.
    pub pool_size: usize,
    pub actors: Vec<ActorView>,
    pub player: PlayerView,
    pub particles_active: usize,
    pub loot_on_ground: usize,
    pub gates: Vec<GateView>,
    pub cues: Vec<Cue>,
}

/// One active actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub handle: ActorHandle,
    pub kind: ActorKind,
    pub position: Vec3,
    pub state: AiState,
    pub alive: bool,
    pub health: f32,
    pub max_health: f32,
    pub health_bar_visible: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub alive: bool,
    pub health: f32,
    pub max_health: f32,
    pub blocking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateView {
    pub id: u32,
    pub locked: bool,
    pub key_gate: bool,
}
