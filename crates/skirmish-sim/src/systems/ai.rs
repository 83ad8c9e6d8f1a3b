//! AI system: evaluates the controller for every active enemy and applies the result.
//!
//! The FSM in skirmish-ai decides; this pass turns its intents into facing,
//! movement, and cues.

use skirmish_core::constants::{FACE_TURN_RATE, PURSUE_SPEED};
use skirmish_core::enums::{AiState, MoveIntent};
use skirmish_core::events::Cue;

use skirmish_ai::fsm::{evaluate, pursue_step, turn_toward, AiContext};

use crate::actor::Actor;
use crate::registry::ActorRegistry;

/// Run one controller update for every active, AI-driven actor, targeting `player`.
pub fn run(registry: &mut ActorRegistry, player: &Actor, dt: f32, cues: &mut Vec<Cue>) {
    let target = player.position;

    for actor in registry.iter_active_mut() {
        if !actor.kind.has_ai() {
            continue;
        }
        let Some(thresholds) = actor.profile.thresholds else {
            continue;
        };

        let ctx = AiContext {
            state: actor.state,
            alive: actor.alive,
            target_alive: player.alive,
            distance: actor.position.distance(target),
            is_attacking: actor.is_attacking,
            thresholds,
        };
        let update = evaluate(&ctx);

        if update.state_changed {
            log::debug!("{} {:?} -> {:?}", actor.id, actor.state, update.new_state);
        }
        actor.state = update.new_state;
        actor.is_attacking = update.is_attacking;

        if update.face_target {
            actor.facing = turn_toward(actor.facing, actor.position, target, FACE_TURN_RATE * dt);
        }
        if update.roar {
            cues.push(Cue::Roar { actor: actor.id });
        }
        if update.attack_started {
            cues.push(Cue::AttackStarted { actor: actor.id });
        }

        match update.movement {
            MoveIntent::Pursue => {
                if update.state_changed && update.new_state == AiState::Pursuing {
                    cues.push(Cue::Pursue { actor: actor.id });
                }
                actor.position = pursue_step(
                    actor.position,
                    target,
                    PURSUE_SPEED,
                    dt,
                    thresholds.attack_radius,
                );
            }
            MoveIntent::Stop => cues.push(Cue::StopMoving { actor: actor.id }),
            MoveIntent::Hold => {}
        }
    }
}
