//! Melee actor finite state machine.
//!
//! Pure functions that compute state transitions and movement/attack intents
//! for a single actor from its distance to the target. No pool or engine
//! dependency: operates on plain data.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use skirmish_core::enums::{AiState, MoveIntent};
use skirmish_core::profile::AiThresholds;
use skirmish_core::types::planar_direction;

/// Input to the FSM for a single actor.
pub struct AiContext {
    pub state: AiState,
    pub alive: bool,
    pub target_alive: bool,
    /// Distance between the actor and its target.
    pub distance: f32,
    /// Attack latch. Set on attack entry, cleared only by death, respawn, or
    /// an explicit attack-finished signal from outside the FSM.
    pub is_attacking: bool,
    pub thresholds: AiThresholds,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiUpdate {
    pub new_state: AiState,
    pub is_attacking: bool,
    pub face_target: bool,
    pub movement: MoveIntent,
    /// Roar hook fired on Idle -> Alert.
    pub roar: bool,
    /// Attack hook fired once when the latch goes from clear to set.
    pub attack_started: bool,
    pub state_changed: bool,
}

impl AiUpdate {
    fn unchanged(ctx: &AiContext) -> Self {
        Self {
            new_state: ctx.state,
            is_attacking: ctx.is_attacking,
            face_target: false,
            movement: MoveIntent::Hold,
            roar: false,
            attack_started: false,
            state_changed: false,
        }
    }

    fn transition(ctx: &AiContext, new_state: AiState) -> Self {
        Self {
            new_state,
            state_changed: new_state != ctx.state,
            ..Self::unchanged(ctx)
        }
    }
}

/// Evaluate the FSM for one actor.
pub fn evaluate(ctx: &AiContext) -> AiUpdate {
    // Dead actors and actors whose target is dead are inert.
    if !ctx.alive || !ctx.target_alive || ctx.state == AiState::Dead {
        return AiUpdate::unchanged(ctx);
    }

    match ctx.state {
        AiState::Idle => evaluate_idle(ctx),
        AiState::Alert | AiState::Pursuing | AiState::Attacking => evaluate_alerted(ctx),
        AiState::Dead => AiUpdate::unchanged(ctx),
    }
}

fn evaluate_idle(ctx: &AiContext) -> AiUpdate {
    if ctx.distance <= ctx.thresholds.look_radius {
        return AiUpdate {
            face_target: true,
            roar: true,
            ..AiUpdate::transition(ctx, AiState::Alert)
        };
    }

    AiUpdate::unchanged(ctx)
}

fn evaluate_alerted(ctx: &AiContext) -> AiUpdate {
    let face_target = !ctx.is_attacking;

    if ctx.distance <= ctx.thresholds.attack_radius || ctx.is_attacking {
        return AiUpdate {
            is_attacking: true,
            // Only the entering tick faces and fires the hook
            face_target,
            attack_started: !ctx.is_attacking,
            ..AiUpdate::transition(ctx, AiState::Attacking)
        };
    }

    if ctx.distance >= ctx.thresholds.stopping_distance {
        return AiUpdate {
            face_target,
            movement: MoveIntent::Stop,
            ..AiUpdate::transition(ctx, AiState::Idle)
        };
    }

    AiUpdate {
        face_target,
        movement: MoveIntent::Pursue,
        ..AiUpdate::transition(ctx, AiState::Pursuing)
    }
}

/// Turn `facing` toward the horizontal direction of `target` by blending yaw.
///
/// `rate_dt` is the turn rate times the frame time; 1.0 or more snaps.
/// Works for a target straight behind, where a vector lerp would collapse.
pub fn turn_toward(facing: Vec3, position: Vec3, target: Vec3, rate_dt: f32) -> Vec3 {
    let desired = planar_direction(position, target);
    if desired == Vec3::ZERO {
        return facing;
    }
    let current_yaw = facing.x.atan2(facing.z);
    let desired_yaw = desired.x.atan2(desired.z);
    let mut delta = desired_yaw - current_yaw;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    let yaw = current_yaw + delta * rate_dt.clamp(0.0, 1.0);
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Advance `position` toward `target` on the x,z plane, stopping `stop_at` short of it.
pub fn pursue_step(position: Vec3, target: Vec3, speed: f32, dt: f32, stop_at: f32) -> Vec3 {
    let offset = target - position;
    let planar_offset = Vec3::new(offset.x, 0.0, offset.z);
    let remaining = planar_offset.length() - stop_at;
    if remaining <= 0.0 {
        return position;
    }
    let step = (speed * dt).min(remaining);
    position + planar_offset.normalize_or_zero() * step
}
