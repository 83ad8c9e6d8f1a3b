//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// AI controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Unaware of the target.
    #[default]
    Idle,
    /// Target spotted this tick; roared.
    Alert,
    /// Closing the distance to the target.
    Pursuing,
    /// Attack latch set; waiting for the swing to finish.
    Attacking,
    /// Health depleted. Left only through respawn.
    Dead,
}

impl AiState {
    /// States in which the actor is aware of its target.
    pub fn is_alerted(self) -> bool {
        matches!(self, AiState::Alert | AiState::Pursuing | AiState::Attacking)
    }
}

/// The closed set of actor variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Hostile melee combatant driven by the AI controller.
    #[default]
    Enemy,
    /// Static prop that can be smashed for loot.
    Breakable,
    /// The player character, target of every enemy.
    Player,
}

impl ActorKind {
    /// Whether this kind runs the AI controller each tick.
    pub fn has_ai(self) -> bool {
        matches!(self, ActorKind::Enemy)
    }

    /// Collision faction for this kind. Hits between equal factions are ignored.
    pub fn faction(self) -> Faction {
        match self {
            ActorKind::Enemy => Faction::Hostile,
            ActorKind::Breakable => Faction::Neutral,
            ActorKind::Player => Faction::Player,
        }
    }
}

/// Collision layer of an attacker or a struck party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Player,
    Hostile,
    Neutral,
}

/// Movement request emitted by the AI controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveIntent {
    /// Keep doing whatever the actor was doing.
    #[default]
    Hold,
    /// Walk toward the target.
    Pursue,
    /// Stop walking.
    Stop,
}
