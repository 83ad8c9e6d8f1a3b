//! Snapshot system: builds a `SimSnapshot` from the engine's state.
//!
//! Read-only apart from taking ownership of the tick's cues.

use std::collections::BTreeMap;

use skirmish_core::events::Cue;
use skirmish_core::state::{ActorView, GateView, PlayerView, SimSnapshot};
use skirmish_core::types::SimTime;

use crate::actor::Actor;
use crate::encounter::Gate;
use crate::particles::ParticlePool;
use crate::registry::ActorRegistry;

pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub registry: &'a ActorRegistry,
    pub player: &'a Actor,
    pub particles: &'a ParticlePool,
    pub loot_on_ground: usize,
    pub gates: &'a BTreeMap<u32, Gate>,
    pub cues: Vec<Cue>,
}

pub fn build_snapshot(inputs: SnapshotInputs<'_>) -> SimSnapshot {
    let SnapshotInputs {
        time,
        registry,
        player,
        particles,
        loot_on_ground,
        gates,
        cues,
    } = inputs;

    SimSnapshot {
        time,
        live_count: registry.live_count(),
        pool_size: registry.len(),
        actors: build_actors(registry),
        player: build_player(player),
        particles_active: particles.active_count(),
        loot_on_ground,
        gates: gates
            .values()
            .map(|gate| GateView {
                id: gate.id,
                locked: gate.is_locked(),
                key_gate: gate.key_gate,
            })
            .collect(),
        cues,
    }
}

fn build_actors(registry: &ActorRegistry) -> Vec<ActorView> {
    registry
        .iter_active()
        .map(|actor| ActorView {
            handle: actor.id,
            kind: actor.kind,
            position: actor.position,
            state: actor.state,
            alive: actor.alive,
            health: actor.health.current(),
            max_health: actor.health.maximum(),
            health_bar_visible: actor.health_bar_visible(),
        })
        .collect()
}

fn build_player(player: &Actor) -> PlayerView {
    PlayerView {
        position: player.position,
        alive: player.alive,
        health: player.health.current(),
        max_health: player.health.maximum(),
        blocking: player.health.is_invulnerable(),
    }
}
