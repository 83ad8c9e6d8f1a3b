//! Knockback integration: moves every active actor and the player by their impulse.

use crate::actor::Actor;
use crate::registry::ActorRegistry;

pub fn run(registry: &mut ActorRegistry, player: &mut Actor, dt: f32) {
    for actor in registry.iter_active_mut() {
        actor.knockback.tick(&mut actor.position, dt);
    }
    player.knockback.tick(&mut player.position, dt);
}
