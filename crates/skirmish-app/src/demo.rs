//! Scripted demo encounter.
//!
//! Stands in for the input and animation layers: the player swings at the
//! nearest actor in reach on a fixed cadence, each enemy swing lands a fixed
//! number of ticks after its attack cue and then reports the attack finished.
//! The arena is one spawn zone behind a kill gate, a key gate that opens once
//! the zone is cleared, and a breakable crate.

use glam::Vec3;
use serde::Serialize;

use skirmish_core::commands::SimCommand;
use skirmish_core::constants::{DT, ENEMY_ATTACK_RADIUS};
use skirmish_core::enums::{ActorKind, Faction};
use skirmish_core::events::{Cue, GameEvent};
use skirmish_core::profile::ConfigError;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::ActorHandle;
use skirmish_sim::combat::{HitTarget, Overlap, WeaponStats};
use skirmish_sim::engine::{SimConfig, SimulationEngine};

/// Ticks between an enemy's attack cue and its blade connecting.
const ENEMY_SWING_TICKS: u64 = 30;
/// Ticks between player swings.
const PLAYER_SWING_INTERVAL: u64 = 20;
/// Player weapon reach (m).
const PLAYER_REACH: f32 = 4.5;
/// Loot within this radius of the player is picked up (m).
const PICKUP_RADIUS: f32 = 4.0;

const ENEMY_WEAPON: WeaponStats = WeaponStats {
    base_damage: 10.0,
    damage_multiplier: 1.0,
    knockback_multiplier: 0.5,
};

const PLAYER_WEAPON: WeaponStats = WeaponStats {
    base_damage: 25.0,
    damage_multiplier: 1.0,
    knockback_multiplier: 1.0,
};

/// Outcome of one demo run.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub ticks: u64,
    pub enemies_slain: usize,
    pub breakables_smashed: usize,
    pub player_deaths: usize,
    pub loot_collected: usize,
    /// Every gate ended unlocked.
    pub cleared: bool,
    pub final_snapshot: SimSnapshot,
}

struct PendingSwing {
    actor: ActorHandle,
    lands_at: u64,
}

/// Run the demo encounter for at most `max_ticks`.
pub fn run(config: SimConfig, max_ticks: u64) -> Result<DemoSummary, ConfigError> {
    let mut engine = SimulationEngine::new(config)?;
    let slain = engine.subscribe();

    let kill_gate = engine.add_gate(false);
    let key_gate = engine.add_gate(true);
    let locations = vec![
        Vec3::new(6.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 7.0),
        Vec3::new(-6.0, 0.0, -2.0),
    ];
    let wave_size = locations.len();
    let zone = engine.add_spawn_zone(locations, vec![kill_gate], false);
    engine.spawn_kind(ActorKind::Breakable, Vec3::new(2.0, 0.0, -2.0));

    // Lock the key gate, then walk into the zone.
    engine.reset_encounter();
    engine.queue_command(SimCommand::TriggerSpawnZone { zone });

    let mut swings: Vec<PendingSwing> = Vec::new();
    let mut enemies_slain = 0;
    let mut breakables_smashed = 0;
    let mut player_deaths = 0;
    let mut loot_collected = 0;
    let mut snapshot = SimSnapshot::default();

    for tick in 0..max_ticks {
        snapshot = engine.tick(DT);

        for event in slain.drain() {
            match event {
                GameEvent::ActorSlain {
                    kind: ActorKind::Enemy,
                    ..
                } => enemies_slain += 1,
                GameEvent::ActorSlain {
                    kind: ActorKind::Breakable,
                    ..
                } => breakables_smashed += 1,
                _ => {}
            }
        }

        for cue in &snapshot.cues {
            match cue {
                Cue::AttackStarted { actor } => swings.push(PendingSwing {
                    actor: *actor,
                    lands_at: tick + ENEMY_SWING_TICKS,
                }),
                Cue::PlayerDied => player_deaths += 1,
                _ => {}
            }
        }

        land_enemy_swings(&mut engine, &mut swings, tick);

        if !snapshot.player.alive {
            engine.respawn_player();
            continue;
        }

        if tick % PLAYER_SWING_INTERVAL == 0 {
            player_swing(&mut engine, &snapshot);
        }
        loot_collected += engine.collect_loot_near(snapshot.player.position, PICKUP_RADIUS);

        if enemies_slain >= wave_size {
            // The last enemy carried the key.
            engine.unlock_gate(key_gate);
        }
        if is_cleared(&snapshot) && enemies_slain >= wave_size {
            log::info!("Encounter cleared at tick {tick}.");
            break;
        }
    }

    Ok(DemoSummary {
        ticks: engine.time().tick,
        enemies_slain,
        breakables_smashed,
        player_deaths,
        loot_collected,
        cleared: is_cleared(&snapshot),
        final_snapshot: snapshot,
    })
}

fn is_cleared(snapshot: &SimSnapshot) -> bool {
    !snapshot.gates.is_empty() && snapshot.gates.iter().all(|gate| !gate.locked)
}

/// Deliver every enemy swing due this tick, then release the attacker's latch.
fn land_enemy_swings(engine: &mut SimulationEngine, swings: &mut Vec<PendingSwing>, tick: u64) {
    let player_position = engine.player().position;
    let mut due = Vec::new();
    swings.retain(|swing| {
        if swing.lands_at <= tick {
            due.push(swing.actor);
            false
        } else {
            true
        }
    });

    for actor in due {
        let Ok(attacker) = engine.registry().get(actor) else {
            continue;
        };
        let origin = attacker.position;
        if attacker.alive && origin.distance(player_position) <= ENEMY_ATTACK_RADIUS + 0.5 {
            let overlap = Overlap {
                attacker_origin: origin,
                attacker_faction: Faction::Hostile,
                target: HitTarget::Player,
                weapon: ENEMY_WEAPON,
            };
            if let Err(err) = engine.queue_overlap(overlap) {
                log::warn!("Enemy swing dropped: {err}");
            }
        }
        engine.queue_command(SimCommand::AttackFinished { actor });
    }
}

/// Swing at the nearest living actor in reach.
fn player_swing(engine: &mut SimulationEngine, snapshot: &SimSnapshot) {
    let origin = snapshot.player.position;
    let target = snapshot
        .actors
        .iter()
        .filter(|actor| actor.alive)
        .map(|actor| (actor.handle, actor.position.distance(origin)))
        .filter(|(_, distance)| *distance <= PLAYER_REACH)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((handle, _)) = target {
        let overlap = Overlap {
            attacker_origin: origin,
            attacker_faction: Faction::Player,
            target: HitTarget::Actor(handle),
            weapon: PLAYER_WEAPON,
        };
        if let Err(err) = engine.queue_overlap(overlap) {
            log::warn!("Player swing dropped: {err}");
        }
    }
}
