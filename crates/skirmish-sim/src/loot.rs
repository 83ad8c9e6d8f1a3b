//! Loot drops: the death-time roll and the dropped instances.
//!
//! Dropped loot is not pooled; each instance is a hecs entity in the
//! engine's loot world until something collects it.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::enums::ActorKind;

/// A loot instance lying on the ground.
#[derive(Debug, Clone, Copy)]
pub struct LootDrop {
    pub position: Vec3,
    /// Kind of the actor that dropped it.
    pub source: ActorKind,
}

/// One Bernoulli trial: draw uniform [0, 100) and drop iff strictly below `percent`.
pub fn roll(rng: &mut ChaCha8Rng, percent: f32) -> bool {
    let draw: f32 = rng.gen_range(0.0..100.0);
    draw < percent
}

/// Place one loot instance.
pub fn spawn(world: &mut World, position: Vec3, source: ActorKind) -> Entity {
    world.spawn((LootDrop { position, source },))
}

/// Number of loot instances on the ground.
pub fn count(world: &World) -> usize {
    world.query::<&LootDrop>().iter().count()
}

/// Remove every loot instance within `radius` of `position` (x,z plane).
/// Uses a caller-owned buffer to avoid per-call allocation. Returns how many were picked up.
pub fn collect_near(
    world: &mut World,
    position: Vec3,
    radius: f32,
    despawn_buffer: &mut Vec<Entity>,
) -> usize {
    despawn_buffer.clear();
    let radius_sq = radius * radius;

    for (entity, drop) in world.query_mut::<&LootDrop>() {
        let dx = drop.position.x - position.x;
        let dz = drop.position.z - position.z;
        if dx * dx + dz * dz <= radius_sq {
            despawn_buffer.push(entity);
        }
    }

    let collected = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    collected
}
