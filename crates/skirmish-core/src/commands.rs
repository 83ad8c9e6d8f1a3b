//! Driver and debug commands applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::ActorHandle;

/// All commands the simulation accepts from its driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Publish `EncounterReset`: re-arm spawn zones, re-lock key gates.
    ResetEncounter,
    /// Fire a spawn zone as if the player had walked into it.
    TriggerSpawnZone { zone: u32 },
    /// Flip player invulnerability (block held / released).
    ToggleBlock,
    /// The attack animation of `actor` finished; clears its attack latch.
    AttackFinished { actor: ActorHandle },
    /// Keep the player at full health every tick while on.
    ToggleGodMode,
    /// Spawn one enemy next to the player.
    SpawnNearPlayer,
    /// Show or hide every pooled actor's health bar.
    SetHealthBars { visible: bool },
}
