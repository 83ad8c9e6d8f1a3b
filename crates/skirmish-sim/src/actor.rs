//! Pooled combat actor and its death/respawn capability.

use glam::Vec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{HealthComponent, KnockbackModel};
use skirmish_core::enums::{ActorKind, AiState, Faction};
use skirmish_core::events::Cue;
use skirmish_core::profile::ActorProfile;
use skirmish_core::types::ActorHandle;

use crate::loot;

/// Handle reported for the player, who lives outside the registry.
pub const PLAYER_HANDLE: ActorHandle = ActorHandle(u32::MAX);

/// A combat entity. Lives in exactly one pool slot and is reused across lives.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorHandle,
    pub kind: ActorKind,
    pub position: Vec3,
    /// Unit vector on the x,z plane.
    pub facing: Vec3,
    pub alive: bool,
    pub state: AiState,
    pub is_attacking: bool,
    pub health: HealthComponent,
    pub knockback: KnockbackModel,
    pub collision_enabled: bool,
    /// User option; the bar is only drawn while the actor is alive.
    pub health_bar_enabled: bool,
    pub profile: ActorProfile,
}

impl Actor {
    pub fn new(id: ActorHandle, kind: ActorKind, profile: ActorProfile) -> Self {
        Self {
            id,
            kind,
            position: Vec3::ZERO,
            facing: Vec3::Z,
            alive: true,
            state: AiState::Idle,
            is_attacking: false,
            health: HealthComponent::new(profile.max_health),
            knockback: KnockbackModel::new(profile.knockback_resistance),
            collision_enabled: true,
            health_bar_enabled: true,
            profile,
        }
    }

    pub fn faction(&self) -> Faction {
        self.kind.faction()
    }

    pub fn health_bar_visible(&self) -> bool {
        self.health_bar_enabled && self.alive
    }

    /// Reconfigure a reused slot for `kind`, dropping every trace of its last life
    /// except `alive`, which `Lifecycle::respawn` owns.
    pub fn configure(&mut self, kind: ActorKind, profile: ActorProfile, position: Vec3) {
        self.kind = kind;
        self.profile = profile;
        self.position = position;
        self.facing = Vec3::Z;
        self.is_attacking = false;
        self.health.reset(profile.max_health);
        self.knockback.reset(profile.knockback_resistance);
        if self.alive {
            self.state = AiState::Idle;
            self.collision_enabled = true;
        }
    }
}

/// Side-effect sinks available while an actor dies.
pub struct DeathContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub loot: &'a mut World,
    pub cues: &'a mut Vec<Cue>,
}

/// Death and respawn, dispatched on the actor's kind.
pub trait Lifecycle {
    /// Run the death transition. Calling it on an already dead actor is a no-op.
    fn die(&mut self, ctx: &mut DeathContext<'_>);
    /// Bring the actor back: latch cleared, health refilled, collision restored.
    fn respawn(&mut self, cues: &mut Vec<Cue>);
}

impl Lifecycle for Actor {
    fn die(&mut self, ctx: &mut DeathContext<'_>) {
        if !self.alive || self.state == AiState::Dead {
            return;
        }

        self.alive = false;
        self.state = AiState::Dead;
        self.is_attacking = false;
        self.collision_enabled = false;

        match self.kind {
            ActorKind::Enemy | ActorKind::Breakable => {
                ctx.cues.push(Cue::Death {
                    actor: self.id,
                    kind: self.kind,
                });
                if loot::roll(ctx.rng, self.profile.loot_drop_percent) {
                    loot::spawn(ctx.loot, self.position, self.kind);
                    ctx.cues.push(Cue::LootDropped {
                        position: self.position,
                    });
                }
            }
            ActorKind::Player => {
                ctx.cues.push(Cue::PlayerDied);
            }
        }

        log::debug!("{:?} {} died at {:?}", self.kind, self.id, self.position);
    }

    fn respawn(&mut self, cues: &mut Vec<Cue>) {
        self.alive = true;
        self.state = AiState::Idle;
        self.is_attacking = false;
        self.collision_enabled = true;
        self.health.fill();

        match self.kind {
            ActorKind::Player => cues.push(Cue::PlayerRespawned),
            ActorKind::Enemy | ActorKind::Breakable => cues.push(Cue::Respawned {
                actor: self.id,
                kind: self.kind,
            }),
        }
    }
}
