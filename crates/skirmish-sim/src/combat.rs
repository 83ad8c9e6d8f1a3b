//! Melee hit resolution.
//!
//! An `Overlap` is one hitbox touching one target for one tick. Each overlap
//! resolves independently: two colliders of the same weapon overlapping the
//! same target land two hits.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use skirmish_core::components::DamageOutcome;
use skirmish_core::enums::{ActorKind, Faction};
use skirmish_core::events::Cue;
use skirmish_core::types::ActorHandle;

use crate::actor::{Actor, DeathContext, Lifecycle};

/// Damage and push carried by a swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub base_damage: f32,
    pub damage_multiplier: f32,
    pub knockback_multiplier: f32,
}

impl WeaponStats {
    pub fn new(base_damage: f32) -> Self {
        Self {
            base_damage,
            damage_multiplier: 1.0,
            knockback_multiplier: 1.0,
        }
    }

    pub fn damage(&self) -> f32 {
        self.base_damage * self.damage_multiplier
    }
}

/// Who the hitbox touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Actor(ActorHandle),
    Player,
}

/// A hitbox overlap queued for delivery on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    pub attacker_origin: Vec3,
    pub attacker_faction: Faction,
    pub target: HitTarget,
    pub weapon: WeaponStats,
}

/// Why an overlap did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Attacker and target share a faction.
    SameFaction,
    /// Target's collision is disabled (dead or reclaimed).
    NoCollision,
    /// Target slot is not in use.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitReport {
    Ignored(IgnoreReason),
    Landed {
        damage: f32,
        /// Unit push direction from the attacker to the target, before scaling.
        push: Vec3,
        outcome: DamageOutcome,
    },
}

impl HitReport {
    pub fn landed(&self) -> bool {
        matches!(self, HitReport::Landed { .. })
    }

    /// Whether this hit killed the target.
    pub fn killed(&self) -> bool {
        matches!(
            self,
            HitReport::Landed {
                outcome: DamageOutcome::Depleted,
                ..
            }
        )
    }
}

/// Apply one hit from `attacker_origin` to `target`: knockback first, then damage.
/// Runs the target's death transition when the hit depletes its health.
pub fn resolve(
    attacker_origin: Vec3,
    attacker_faction: Faction,
    weapon: &WeaponStats,
    target: &mut Actor,
    death: &mut DeathContext<'_>,
) -> HitReport {
    if target.faction() == attacker_faction {
        return HitReport::Ignored(IgnoreReason::SameFaction);
    }
    if !target.collision_enabled {
        return HitReport::Ignored(IgnoreReason::NoCollision);
    }

    let push = (target.position - attacker_origin).normalize_or_zero();
    target
        .knockback
        .apply(push * weapon.knockback_multiplier * weapon.damage_multiplier);

    let damage = weapon.damage();
    let outcome = target.health.take_damage(damage);
    log::trace!(
        "{} took {damage} ({outcome:?}), {} left.",
        target.id,
        target.health.current()
    );

    if target.kind == ActorKind::Player
        && matches!(outcome, DamageOutcome::Wounded | DamageOutcome::Depleted)
    {
        death.cues.push(Cue::PlayerHit {
            damage,
            remaining: target.health.current(),
        });
    }

    if outcome == DamageOutcome::Depleted {
        target.die(death);
    }

    HitReport::Landed {
        damage,
        push,
        outcome,
    }
}
